// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// webcrawl does one thing, so there are no subcommands: the seed URL is a
// positional argument and every crawl knob is a flag with a default that
// matches the engine's.
// =============================================================================

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "webcrawl",
    version = "0.1.0",
    about = "Crawl the web breadth-first from a seed URL and print the link graph",
    long_about = "webcrawl fetches the seed page, extracts its links, and keeps visiting \
                  previously-unseen links concurrently until the frontier is empty or the \
                  crawl limit is reached."
)]
pub struct Cli {
    /// Seed URL to start crawling from (e.g., https://example.com)
    pub seed_url: String,

    /// Number of concurrent fetch workers
    #[arg(long, default_value_t = 5)]
    pub workers: usize,

    /// Maximum number of distinct pages to visit, seed included.
    /// 0 means unbounded.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Per-request fetch timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub fetch_timeout: u64,

    /// How many seconds to wait for workers to finish once the crawl
    /// is winding down
    #[arg(long, default_value_t = 10)]
    pub shutdown_timeout: u64,

    /// Output results in JSON format instead of the indented text listing
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    // The engine's sentinel for "unbounded" is None; on the command line
    // it is --limit 0
    pub fn crawl_limit(&self) -> Option<usize> {
        if self.limit == 0 {
            None
        } else {
            Some(self.limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_engine() {
        let cli = Cli::parse_from(["webcrawl", "https://example.com"]);
        assert_eq!(cli.seed_url, "https://example.com");
        assert_eq!(cli.workers, 5);
        assert_eq!(cli.crawl_limit(), Some(10));
        assert_eq!(cli.shutdown_timeout, 10);
        assert!(!cli.json);
    }

    #[test]
    fn test_limit_zero_means_unbounded() {
        let cli = Cli::parse_from(["webcrawl", "https://example.com", "--limit", "0"]);
        assert_eq!(cli.crawl_limit(), None);
    }
}
