//! In-memory catalog store

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CatalogStore;
use crate::{error::AppResult, models::book::Book};

/// Volatile catalog store. Used by tests and available for embedding the
/// lending engine without a backing file.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn load(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn save(&self, books: &[Book]) -> AppResult<()> {
        *self.books.write().await = books.to_vec();
        Ok(())
    }
}
