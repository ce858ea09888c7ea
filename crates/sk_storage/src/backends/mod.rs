pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use sk_core::ArticleRecord;
use std::cmp::Ordering;

/// Recency order shared by the backends: dated records newest first,
/// records with an absent or empty timestamp after all dated ones.
pub(crate) fn recency_order(a: &ArticleRecord, b: &ArticleRecord) -> Ordering {
    let key = |r: &ArticleRecord| {
        r.publication_timestamp
            .clone()
            .filter(|ts| !ts.is_empty())
    };
    match (key(a), key(b)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
