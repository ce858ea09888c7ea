//! Extraction of article stubs from the news listing page.

use std::collections::HashSet;
use std::sync::Arc;

use scraper::{Html, Selector};
use sk_core::ArticleStub;
use tracing::{debug, error};
use url::Url;

use crate::client::PageFetcher;

pub struct ListingScraper {
    fetcher: Arc<dyn PageFetcher>,
}

impl ListingScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch the listing page and extract one stub per usable teaser block.
    /// A transport failure is reported and yields an empty list, not an
    /// error: the caller treats it as "nothing found".
    pub async fn fetch_stubs(&self, listing_url: &str) -> Vec<ArticleStub> {
        let html = match self.fetcher.fetch(listing_url).await {
            Ok(body) => body,
            Err(e) => {
                error!("network error fetching listing {}: {}", listing_url, e);
                return Vec::new();
            }
        };
        let stubs = parse_stubs(&html, listing_url);
        debug!("extracted {} stubs from {}", stubs.len(), listing_url);
        stubs
    }
}

/// Walk the teaser blocks in document order. A block needs a title link with
/// a non-empty href; anything else is benign markup noise and skipped.
/// Duplicate urls keep their first occurrence only.
pub fn parse_stubs(html: &str, listing_url: &str) -> Vec<ArticleStub> {
    let document = Html::parse_document(html);
    let tease_selector = Selector::parse("article.c-tease").unwrap();
    let title_selector = Selector::parse("h3.c-tease__title").unwrap();
    let link_selector = Selector::parse("a[href]").unwrap();
    let time_selector = Selector::parse("time").unwrap();

    let mut stubs = Vec::new();
    let mut seen = HashSet::new();

    for block in document.select(&tease_selector) {
        if let Some(title) = block.select(&title_selector).next() {
            if let Some(link) = title.select(&link_selector).next() {
                if let Some(href) = link.value().attr("href") {
                    if href.is_empty() {
                        continue;
                    }
                    let url = if href.starts_with("http") {
                        href.to_string()
                    } else {
                        match Url::parse(listing_url).and_then(|base| base.join(href)) {
                            Ok(resolved) => resolved.to_string(),
                            Err(_) => continue,
                        }
                    };
                    if !seen.insert(url.clone()) {
                        continue;
                    }

                    let inline_timestamp = block
                        .select(&time_selector)
                        .next()
                        .and_then(|time| time.value().attr("datetime"))
                        .map(|datetime| datetime.to_string());

                    stubs.push(ArticleStub {
                        url,
                        title: link.text().collect::<String>().trim().to_string(),
                        inline_timestamp,
                    });
                }
            }
        }
    }

    stubs
}
