// src/crawl/fetch.rs
// =============================================================================
// This module defines how the crawler gets hold of a page.
//
// The engine consumes fetching as a capability: "given a URL, return its
// HTML or a fetch error". That seam is the PageFetcher trait. Production
// code plugs in HttpFetcher (reqwest underneath); the engine tests plug in
// a map of canned pages and never touch the network.
//
// async-trait boxes the returned futures so the trait stays object-safe
// and easy to implement.
// =============================================================================

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;

// The capability the crawl engine needs from the outside world
#[async_trait]
pub trait PageFetcher {
    // Fetches a page and returns its HTML body
    //
    // Any failure (network error, timeout, non-2xx status) comes back as an
    // Err; the engine logs it and abandons that branch of the crawl only.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

// The real fetcher, backed by a shared reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        // One client for the whole crawl (connection pooling)
        let client = Client::builder()
            .user_agent(concat!("sitemap-generator/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        // A response arrived but the server said no - still a fetch failure
        if !response.status().is_success() {
            return Err(anyhow!("HTTP {}", response.status()));
        }

        Ok(response.text().await?)
    }
}
