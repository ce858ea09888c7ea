use serde::{Deserialize, Serialize};

/// One teaser from the listing page: the candidate article's link, title and
/// whatever machine-readable timestamp the teaser itself carried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleStub {
    pub url: String,
    pub title: String,
    pub inline_timestamp: Option<String>,
}

/// What a single article page yielded. `timestamp_is_canonical` is true only
/// when the timestamp came from a machine-readable `datetime` attribute and
/// can be stored verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleDetail {
    pub content: String,
    pub timestamp_raw: Option<String>,
    pub timestamp_is_canonical: bool,
}

/// The persisted article. `url` is the unique key; rows are written once and
/// never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub title: String,
    pub publication_timestamp: Option<String>,
    pub source: String,
    pub content: String,
}
