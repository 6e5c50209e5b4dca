// src/report/mod.rs
// =============================================================================
// This module defines the crawl output types and the result sink.
//
// Submodules:
// - sink: The ResultSink trait and its channel-backed implementation
//
// A CrawlResult is produced exactly once per address the workers dequeue:
// either the set of links extracted from the fetched page, or a failure
// marker when the fetch did not succeed. The sink is how the engine hands
// results to whoever is reporting them (the CLI printer, a test collector)
// without the workers having to wait on that consumer.
// =============================================================================

mod sink;

pub use sink::{ChannelSink, ResultSink};

use serde::{Deserialize, Serialize};

use crate::fetch::FetchError;

// The outcome of processing one address
//
// #[derive(Serialize, Deserialize)] lets us convert to/from JSON for --json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CrawlOutcome {
    /// The page was fetched; `links` holds every validated link found on it
    Fetched { links: Vec<String> },
    /// The fetch failed; the address is never retried
    Failed { error: String },
}

// One crawled address paired with what came out of it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    /// The address that was dequeued and fetched
    pub url: String,
    #[serde(flatten)]
    pub outcome: CrawlOutcome,
}

impl CrawlResult {
    pub fn fetched(url: String, links: Vec<String>) -> Self {
        Self {
            url,
            outcome: CrawlOutcome::Fetched { links },
        }
    }

    pub fn failed(url: String, error: &FetchError) -> Self {
        Self {
            url,
            outcome: CrawlOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    /// True when the page was fetched successfully
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, CrawlOutcome::Fetched { .. })
    }
}

// Formats one result the way the crawler prints it in text mode:
// the page URL on its own line, then each link tab-indented below it
pub fn format_page(result: &CrawlResult) -> String {
    match &result.outcome {
        CrawlOutcome::Fetched { links } => {
            let mut out = result.url.clone();
            for link in links {
                out.push('\n');
                out.push('\t');
                out.push_str(link);
            }
            out
        }
        CrawlOutcome::Failed { error } => {
            format!("{}\n\t(fetch failed: {})", result.url, error)
        }
    }
}
