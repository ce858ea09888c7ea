use std::path::Path;

use async_trait::async_trait;
use sk_core::{ArticleRecord, ArticleStore, Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use tracing::debug;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        article_id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        publication_timestamp TEXT,
        source TEXT NOT NULL,
        content TEXT NOT NULL
    )
    "#,
];

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `db_path` and bring the
    /// schema up to date.
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Storage(format!("failed to open database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("failed to run migration {}: {}", i, e)))?;
        }
        debug!("database ready at {}", db_path.display());

        Ok(Self { pool })
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn upsert_if_absent(&self, record: &ArticleRecord) -> Result<bool> {
        // INSERT OR IGNORE turns the url uniqueness violation into an
        // unchanged row count instead of an error.
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO articles (url, title, publication_timestamp, source, content)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.url)
        .bind(&record.title)
        .bind(record.publication_timestamp.as_deref())
        .bind(&record.source)
        .bind(&record.content)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to store article: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ArticleRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT url, title, publication_timestamp, source, content FROM articles
            ORDER BY (publication_timestamp IS NULL OR publication_timestamp = '') ASC,
                     publication_timestamp DESC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to list articles: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| ArticleRecord {
                url: row.get("url"),
                title: row.get("title"),
                publication_timestamp: row.get("publication_timestamp"),
                source: row.get("source"),
                content: row.get("content"),
            })
            .collect())
    }
}
