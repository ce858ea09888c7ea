pub mod client;
pub mod crawl;
pub mod detail;
pub mod listing;

pub use client::{HttpFetcher, PageFetcher};
pub use crawl::{Crawler, LISTING_URL, SOURCE};

pub mod prelude {
    pub use super::client::PageFetcher;
    pub use super::crawl::Crawler;
    pub use sk_core::{ArticleRecord, ArticleStub, Result};
}
