// src/fetch/mod.rs
// =============================================================================
// This module is the fetch collaborator: it turns an address into the
// content of the page behind it.
//
// Submodules:
// - http: The real implementation on top of reqwest
//
// The engine only ever talks to the Fetch trait, so tests can drive the
// whole crawl with a deterministic stub instead of the network. Every
// failure mode (timeout, bad status, transport trouble) surfaces as a
// FetchError for that one address; fetch errors are never fatal to the
// crawl as a whole.
// =============================================================================

mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use thiserror::Error;

// What can go wrong fetching a single address
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status code
    #[error("HTTP {0}")]
    Status(u16),
    /// The request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,
    /// Anything else: DNS, TLS, connection refused, ...
    #[error("transport error: {0}")]
    Transport(String),
}

// The fetch capability the worker pool consumes
//
// Fetches are the crawl's only suspension points, so this is the one
// async trait in the engine's boundary.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
