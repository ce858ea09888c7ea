//! One crawl pass: listing stubs, per-article detail fetches, timestamp
//! reconciliation, and a batch of records in discovery order.

use std::sync::Arc;

use chrono::NaiveDateTime;
use futures::future::join_all;
use sk_core::{timestamp, ArticleDetail, ArticleRecord, ArticleStub, Error, Result};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::client::PageFetcher;
use crate::detail::DetailScraper;
use crate::listing::ListingScraper;

pub const LISTING_URL: &str = "https://skift.com/news/";
pub const SOURCE: &str = "skift.com";

const DETAIL_CONCURRENCY: usize = 10;

pub struct Crawler {
    listing: ListingScraper,
    detail: DetailScraper,
    semaphore: Arc<Semaphore>,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            listing: ListingScraper::new(fetcher.clone()),
            detail: DetailScraper::new(fetcher),
            semaphore: Arc::new(Semaphore::new(DETAIL_CONCURRENCY)),
        }
    }

    /// Run one pass against the listing page. Detail pages are fetched with
    /// bounded concurrency; records come back in the order the stubs were
    /// discovered. A failed stub is logged and skipped, never fatal.
    pub async fn run(&self, listing_url: &str, reference_now: NaiveDateTime) -> Vec<ArticleRecord> {
        let stubs = self.listing.fetch_stubs(listing_url).await;
        if stubs.is_empty() {
            info!("no articles found on {}", listing_url);
            return Vec::new();
        }
        info!("📰 found {} articles on {}", stubs.len(), listing_url);

        let futures = stubs
            .iter()
            .map(|stub| self.process_stub(stub, reference_now))
            .collect::<Vec<_>>();

        let mut records = Vec::new();
        for (stub, result) in stubs.iter().zip(join_all(futures).await) {
            match result {
                Ok(record) => records.push(record),
                Err(e) => warn!("error processing article {}: {}", stub.url, e),
            }
        }
        records
    }

    async fn process_stub(
        &self,
        stub: &ArticleStub,
        reference_now: NaiveDateTime,
    ) -> Result<ArticleRecord> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| Error::External(e.into()))?;

        let detail = self.detail.fetch_detail(&stub.url, reference_now).await;
        Ok(ArticleRecord {
            url: stub.url.clone(),
            title: stub.title.clone(),
            publication_timestamp: resolve_timestamp(stub, &detail, reference_now),
            source: SOURCE.to_string(),
            content: detail.content,
        })
    }
}

/// Timestamp precedence: the article page wins over the listing teaser. A
/// canonical detail timestamp is stored verbatim, a raw one goes through the
/// normalizer, and only a missing detail timestamp falls back to the
/// teaser's `datetime` attribute.
fn resolve_timestamp(
    stub: &ArticleStub,
    detail: &ArticleDetail,
    reference_now: NaiveDateTime,
) -> Option<String> {
    match &detail.timestamp_raw {
        Some(raw) if detail.timestamp_is_canonical => Some(raw.clone()),
        Some(raw) => timestamp::normalize(raw, reference_now),
        None => stub.inline_timestamp.clone(),
    }
}
