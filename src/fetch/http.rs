// src/fetch/http.rs
// =============================================================================
// The real fetcher, built on reqwest.
//
// How it works:
// 1. One Client is built up front with the per-request timeout and shared
//    by every worker (reqwest clients pool connections internally)
// 2. fetch() GETs the page and reads the body as text
// 3. Non-success statuses and client errors are mapped onto FetchError
//    so a slow or broken page costs exactly one failed address
// =============================================================================

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use super::{Fetch, FetchError};

// HTTP fetcher shared by the whole worker pool
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the fetcher with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(categorize_error)
    }
}

// Maps a reqwest error onto our fetch taxonomy
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(error.to_string())
    }
}
