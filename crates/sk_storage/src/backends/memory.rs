use async_trait::async_trait;
use sk_core::{ArticleRecord, ArticleStore, Result};
use tokio::sync::RwLock;

use super::recency_order;

/// In-memory store with the same contract as the SQLite backend. Used by
/// orchestrator tests and selectable from the CLI for dry runs.
pub struct MemoryStore {
    articles: RwLock<Vec<ArticleRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            articles: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn upsert_if_absent(&self, record: &ArticleRecord) -> Result<bool> {
        let mut articles = self.articles.write().await;
        if articles.iter().any(|a| a.url == record.url) {
            return Ok(false);
        }
        articles.push(record.clone());
        Ok(true)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ArticleRecord>> {
        let articles = self.articles.read().await;
        let mut rows = articles.clone();
        rows.sort_by(recency_order);
        rows.truncate(limit);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, timestamp: Option<&str>) -> ArticleRecord {
        ArticleRecord {
            url: url.to_string(),
            title: format!("Title for {}", url),
            publication_timestamp: timestamp.map(|ts| ts.to_string()),
            source: "skift.com".to_string(),
            content: "Body.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_url_is_not_inserted() {
        let store = MemoryStore::new();
        let article = record("https://skift.com/a/", Some("2024-01-02T10:00:00"));

        assert!(store.upsert_if_absent(&article).await.unwrap());
        assert!(!store.upsert_if_absent(&article).await.unwrap());

        let rows = store.recent(10).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_recent_sorts_dated_first_newest_first() {
        let store = MemoryStore::new();
        store
            .upsert_if_absent(&record("https://skift.com/old/", Some("2024-01-01T08:00:00")))
            .await
            .unwrap();
        store
            .upsert_if_absent(&record("https://skift.com/undated/", None))
            .await
            .unwrap();
        store
            .upsert_if_absent(&record("https://skift.com/new/", Some("2024-01-02T09:00:00")))
            .await
            .unwrap();
        store
            .upsert_if_absent(&record("https://skift.com/blank/", Some("")))
            .await
            .unwrap();

        let rows = store.recent(10).await.unwrap();
        assert_eq!(rows[0].url, "https://skift.com/new/");
        assert_eq!(rows[1].url, "https://skift.com/old/");
        // Absent and empty timestamps both land after every dated record.
        assert!(rows[2].publication_timestamp.as_deref().unwrap_or("").is_empty());
        assert!(rows[3].publication_timestamp.as_deref().unwrap_or("").is_empty());
    }

    #[tokio::test]
    async fn test_recent_respects_limit() {
        let store = MemoryStore::new();
        for i in 0..8 {
            store
                .upsert_if_absent(&record(
                    &format!("https://skift.com/{}/", i),
                    Some(&format!("2024-01-0{}T00:00:00", i + 1)),
                ))
                .await
                .unwrap();
        }
        let rows = store.recent(5).await.unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].url, "https://skift.com/7/");
    }
}
