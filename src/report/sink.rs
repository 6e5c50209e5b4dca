// src/report/sink.rs
// =============================================================================
// The result sink: how workers hand finished CrawlResults to the reporter.
//
// Workers must never wait on the reporting side, so the standard sink is a
// thin wrapper over an unbounded tokio channel: emit() is a non-blocking
// send, and the consumer (the CLI printer) drains the receiver at its own
// pace. Tests use their own collecting implementations of the trait.
// =============================================================================

use tokio::sync::mpsc;

use super::CrawlResult;

// Anything that can absorb crawl results as workers produce them
//
// emit() must not block: workers call it inline between fetches.
pub trait ResultSink: Send + Sync {
    fn emit(&self, result: CrawlResult);
}

// Channel-backed sink: results go into an unbounded mpsc channel
// and come out on the receiver handed back from new()
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<CrawlResult>,
}

impl ChannelSink {
    // Creates the sink plus the receiver the reporting side drains
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CrawlResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ResultSink for ChannelSink {
    fn emit(&self, result: CrawlResult) {
        // If the receiver is gone the reporter has stopped listening;
        // dropping the result is the right thing to do then
        let _ = self.tx.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emitted_results_arrive_on_receiver() {
        let (sink, mut rx) = ChannelSink::new();
        sink.emit(CrawlResult::fetched("https://a.example".to_string(), vec![]));
        sink.emit(CrawlResult::fetched("https://b.example".to_string(), vec![]));
        drop(sink);

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.url, "https://a.example");
        assert_eq!(second.url, "https://b.example");
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_emit_after_receiver_dropped_does_not_panic() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.emit(CrawlResult::fetched("https://a.example".to_string(), vec![]));
    }
}
