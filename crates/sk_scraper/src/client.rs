use std::time::Duration;

use async_trait::async_trait;
use sk_core::Result;

/// Every page fetch uses the same fixed timeout; a slow response is treated
/// the same as a network error.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport seam: fetch a url and return its body. Implemented over
/// reqwest in production, replaced by a canned map in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
