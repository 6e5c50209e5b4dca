// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Wire the real collaborators (HTTP fetcher, HTML extractor, URL
//    validator) into the crawl engine
// 3. Stream results to stdout as they arrive (or collect them for --json)
// 4. Exit with proper code (0 = clean crawl, 1 = degraded shutdown,
//    2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod engine; // src/engine/ - the concurrent frontier-crawl engine
mod extract; // src/extract/ - link extraction and validation
mod fetch; // src/fetch/ - HTTP fetching
mod report; // src/report/ - crawl results and the result sink

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use engine::{CrawlConfig, CrawlController};
use extract::{HtmlLinkExtractor, UrlValidator};
use fetch::HttpFetcher;
use report::{ChannelSink, CrawlResult};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    // RUST_LOG controls engine logging; user-facing output goes to stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    println!("🕸️  Crawling from: {}", cli.seed_url);
    match cli.crawl_limit() {
        Some(limit) => println!("📊 Workers: {}, page limit: {}", cli.workers, limit),
        None => println!("📊 Workers: {}, page limit: unbounded", cli.workers),
    }
    println!();

    let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(cli.fetch_timeout))?);
    let extractor = Arc::new(HtmlLinkExtractor::new());
    let validator = Arc::new(UrlValidator);
    let (sink, mut results_rx) = ChannelSink::new();

    let config = CrawlConfig {
        workers: cli.workers,
        limit: cli.crawl_limit(),
        shutdown_deadline: Duration::from_secs(cli.shutdown_timeout),
    };
    let controller = CrawlController::new(config, fetcher, extractor, validator, Arc::new(sink));

    // Stream pages as workers finish them; --json collects instead so the
    // output stays one valid document
    let json = cli.json;
    let printer = tokio::spawn(async move {
        let mut collected = Vec::new();
        while let Some(result) = results_rx.recv().await {
            if !json {
                println!("{}", report::format_page(&result));
            }
            collected.push(result);
        }
        collected
    });

    let crawl_report = controller.run(&cli.seed_url).await?;

    // The controller (and every worker) is gone now, so the sink's sender
    // side is dropped and the printer drains to completion
    let results: Vec<CrawlResult> = printer.await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    print_summary(&crawl_report, &results);

    if crawl_report.clean_shutdown {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Prints the closing summary after the page listing
fn print_summary(crawl_report: &engine::CrawlReport, results: &[CrawlResult]) {
    let failed = results.iter().filter(|r| !r.is_ok()).count();

    println!();
    println!("📊 Summary:");
    println!("   🔗 Pages discovered: {}", crawl_report.visited.len());
    println!("   📄 Pages fetched: {}", results.len() - failed);
    println!("   ❌ Fetch failures: {}", failed);
    println!("   ⏱️  Elapsed: {:.2?}", crawl_report.elapsed);

    if !crawl_report.clean_shutdown {
        println!("   ⚠️  Workers did not finish before the shutdown deadline");
    }
}
