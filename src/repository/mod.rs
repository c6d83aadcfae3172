//! Catalog persistence layer

pub mod file;
pub mod memory;

use async_trait::async_trait;

use crate::{error::AppResult, models::book::Book};

pub use file::FileCatalogStore;
pub use memory::MemoryCatalogStore;

/// Persistence boundary for the book catalog.
///
/// The catalog is an ordered sequence of books, loaded and saved wholesale:
/// every mutation rewrites the complete sequence, there is no incremental
/// append. Implementations must treat a missing backing store as an empty
/// catalog rather than an error.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Read the full catalog
    async fn load(&self) -> AppResult<Vec<Book>>;

    /// Replace the persisted catalog with the given sequence
    async fn save(&self, books: &[Book]) -> AppResult<()>;
}
