// src/engine/mod.rs
// =============================================================================
// This module is the concurrent frontier-crawl engine.
//
// Submodules:
// - visited: The registry of every address ever admitted to the crawl
// - frontier: The FIFO work queue plus the in-flight counter
// - worker: The fetch-and-expand loop each pool member runs
// - controller: Owns the registry and frontier, runs the pool to completion
//
// The engine knows nothing about HTTP or HTML; it drives the Fetch,
// ExtractLinks and Validate capabilities it is handed and emits results
// through a ResultSink.
// =============================================================================

mod controller;
mod frontier;
mod visited;
mod worker;

pub use controller::{CrawlConfig, CrawlController, CrawlError, CrawlPhase, CrawlReport};
pub use frontier::Frontier;
pub use visited::VisitedRegistry;
