pub mod backends;

pub use backends::{MemoryStore, SqliteStore};

use std::path::Path;
use std::sync::Arc;

use sk_core::{ArticleStore, Error, Result};

/// Build a store by backend name. The SQLite backend creates its database
/// file and schema on first open.
pub async fn create_store(kind: &str, db_path: &Path) -> Result<Arc<dyn ArticleStore>> {
    match kind {
        "sqlite" => Ok(Arc::new(SqliteStore::open(db_path).await?)),
        "memory" => Ok(Arc::new(MemoryStore::new())),
        other => Err(Error::Storage(format!("unknown storage backend: {}", other))),
    }
}
