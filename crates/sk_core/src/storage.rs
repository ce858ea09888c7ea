use async_trait::async_trait;

use crate::types::ArticleRecord;
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert the record unless a row with the same url already exists.
    /// Returns true when a new row was written. Must be atomic under
    /// concurrent calls for the same url.
    async fn upsert_if_absent(&self, record: &ArticleRecord) -> Result<bool>;

    /// The most recent records, newest publication timestamp first. Records
    /// without a timestamp sort after every dated record.
    async fn recent(&self, limit: usize) -> Result<Vec<ArticleRecord>>;
}
