pub mod error;
pub mod storage;
pub mod timestamp;
pub mod types;

pub use error::Error;
pub use storage::ArticleStore;
pub use types::{ArticleDetail, ArticleRecord, ArticleStub};

pub type Result<T> = std::result::Result<T, Error>;
