// src/engine/controller.rs
// =============================================================================
// The crawl controller: owns the visited registry and the frontier, runs
// the worker pool, and decides when the crawl is over.
//
// Lifecycle: Idle -> Running -> Draining -> Terminated
// - Running begins when the seed is admitted and pushed and the pool spawns
// - Draining begins when the in-flight counter reaches zero or the
//   registry reaches the crawl limit; the frontier is closed and workers
//   finish their current item and exit
// - If the pool has not exited by the shutdown deadline, the remaining
//   tasks are aborted and the report records an unclean shutdown, which
//   is a degraded result, not an error
//
// run() consumes the controller: once Terminated, nothing further can be
// done with it except reading the report it returned.
// =============================================================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::frontier::Frontier;
use super::visited::VisitedRegistry;
use super::worker::{run_worker, WorkerContext};
use crate::extract::{ExtractLinks, Validate};
use crate::fetch::Fetch;
use crate::report::ResultSink;

// Knobs for one crawl; defaults match the CLI's
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Number of concurrent fetch-and-expand workers
    pub workers: usize,
    /// Maximum number of distinct addresses ever admitted, seed included.
    /// None means unbounded.
    pub limit: Option<usize>,
    /// How long to wait for workers to exit once draining begins
    pub shutdown_deadline: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            limit: Some(10),
            shutdown_deadline: Duration::from_secs(10),
        }
    }
}

// The only failures that stop a crawl from starting; everything that goes
// wrong after startup is local to one address and non-fatal
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{0}'")]
    InvalidSeed(String),
}

// Where the controller is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Idle,
    Running,
    Draining,
    Terminated,
}

// What a finished crawl reports back
#[derive(Debug)]
pub struct CrawlReport {
    /// Every admitted address, in discovery order
    pub visited: Vec<String>,
    /// False when workers had to be aborted at the shutdown deadline
    pub clean_shutdown: bool,
    pub elapsed: Duration,
}

pub struct CrawlController {
    config: CrawlConfig,
    phase: CrawlPhase,
    frontier: Arc<Frontier>,
    registry: Arc<VisitedRegistry>,
    fetcher: Arc<dyn Fetch>,
    extractor: Arc<dyn ExtractLinks>,
    validator: Arc<dyn Validate>,
    sink: Arc<dyn ResultSink>,
}

impl CrawlController {
    pub fn new(
        config: CrawlConfig,
        fetcher: Arc<dyn Fetch>,
        extractor: Arc<dyn ExtractLinks>,
        validator: Arc<dyn Validate>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        let registry = Arc::new(VisitedRegistry::new(config.limit));
        Self {
            config,
            phase: CrawlPhase::Idle,
            frontier: Arc::new(Frontier::new()),
            registry,
            fetcher,
            extractor,
            validator,
            sink,
        }
    }

    // Runs the crawl from the seed to completion and returns the report.
    // Consumes the controller: Terminated is final.
    pub async fn run(mut self, seed: &str) -> Result<CrawlReport, CrawlError> {
        if seed.is_empty() || !self.validator.validate(seed) {
            return Err(CrawlError::InvalidSeed(seed.to_string()));
        }

        let started = Instant::now();
        self.phase = CrawlPhase::Running;

        // The seed is the first admission; push it only if the registry
        // took it (a zero limit admits nothing at all)
        if self.registry.try_admit(seed) {
            self.frontier.push(seed.to_string());
        }

        let workers = self.config.workers.max(1);
        debug!(phase = ?self.phase, workers, limit = ?self.config.limit, seed, "starting worker pool");

        let handles: Vec<_> = (0..workers)
            .map(|id| {
                let ctx = WorkerContext {
                    frontier: Arc::clone(&self.frontier),
                    registry: Arc::clone(&self.registry),
                    fetcher: Arc::clone(&self.fetcher),
                    extractor: Arc::clone(&self.extractor),
                    validator: Arc::clone(&self.validator),
                    sink: Arc::clone(&self.sink),
                };
                tokio::spawn(run_worker(id, ctx))
            })
            .collect();

        // Running -> Draining once no more work will ever arrive, or a
        // worker closed the frontier because the registry filled up
        self.frontier.drained().await;
        self.phase = CrawlPhase::Draining;
        self.frontier.close();
        debug!(phase = ?self.phase, "draining worker pool");

        let abort_handles: Vec<_> = handles.iter().map(|h| h.abort_handle()).collect();
        let clean_shutdown = match timeout(self.config.shutdown_deadline, join_all(handles)).await
        {
            Ok(joined) => joined.iter().all(|result| result.is_ok()),
            Err(_) => {
                warn!(
                    deadline = ?self.config.shutdown_deadline,
                    "shutdown deadline elapsed with workers still running"
                );
                for abort in abort_handles {
                    abort.abort();
                }
                false
            }
        };

        self.phase = CrawlPhase::Terminated;
        let report = CrawlReport {
            visited: self.registry.snapshot(),
            clean_shutdown,
            elapsed: started.elapsed(),
        };
        info!(
            phase = ?self.phase,
            visited = report.visited.len(),
            clean = report.clean_shutdown,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "crawl finished"
        );
        Ok(report)
    }
}
