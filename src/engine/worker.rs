// src/engine/worker.rs
// =============================================================================
// The fetch-and-expand loop that every member of the worker pool runs.
//
// For each address pulled off the frontier:
// 1. Fetch the page; on failure, emit a failure result and move on.
//    The address is never retried and the pool keeps running
// 2. Extract candidate links and drop any the validator rejects
// 3. Try to admit each surviving candidate into the visited registry;
//    the ones that get in are pushed back onto the frontier
// 4. Emit a CrawlResult for the address
// 5. If the registry just filled up, close the frontier so the pool drains
// 6. Mark the address done, after the neighbor pushes, so the in-flight
//    counter never transiently reads zero mid-expansion
//
// The loop ends when the frontier reports that no more work will arrive.
// =============================================================================

use std::sync::Arc;

use tracing::debug;

use super::frontier::Frontier;
use super::visited::VisitedRegistry;
use crate::extract::{ExtractLinks, Validate};
use crate::fetch::Fetch;
use crate::report::{CrawlResult, ResultSink};

// Shared handles one worker needs; every worker gets its own clone
#[derive(Clone)]
pub(crate) struct WorkerContext {
    pub frontier: Arc<Frontier>,
    pub registry: Arc<VisitedRegistry>,
    pub fetcher: Arc<dyn Fetch>,
    pub extractor: Arc<dyn ExtractLinks>,
    pub validator: Arc<dyn Validate>,
    pub sink: Arc<dyn ResultSink>,
}

pub(crate) async fn run_worker(id: usize, ctx: WorkerContext) {
    while let Some(address) = ctx.frontier.next().await {
        match ctx.fetcher.fetch(&address).await {
            Ok(content) => {
                let links: Vec<String> = ctx
                    .extractor
                    .extract(&content, &address)
                    .into_iter()
                    .filter(|candidate| ctx.validator.validate(candidate))
                    .collect();

                for link in &links {
                    if ctx.registry.try_admit(link) {
                        ctx.frontier.push(link.clone());
                    }
                }

                debug!(worker = id, url = %address, links = links.len(), "expanded page");
                ctx.sink.emit(CrawlResult::fetched(address, links));
            }
            Err(error) => {
                debug!(worker = id, url = %address, %error, "fetch failed");
                ctx.sink.emit(CrawlResult::failed(address, &error));
            }
        }

        if ctx.registry.at_capacity() {
            ctx.frontier.close();
        }

        ctx.frontier.task_done();
    }

    debug!(worker = id, "worker exiting");
}
