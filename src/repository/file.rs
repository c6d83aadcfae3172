//! JSON-file-backed catalog store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::CatalogStore;
use crate::{error::AppResult, models::book::Book};

/// Catalog store persisting the full book sequence as a pretty-printed JSON
/// array in a single flat file.
#[derive(Debug, Clone)]
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Sibling of the target file so the rename never crosses filesystems
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl CatalogStore for FileCatalogStore {
    async fn load(&self) -> AppResult<Vec<Book>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, books: &[Book]) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(books)?;

        let staging = self.staging_path();
        tokio::fs::write(&staging, &json).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::{Book, BookStatus};
    use tempfile::tempdir;

    fn sample_catalog() -> Vec<Book> {
        let mut borrowed = Book::new(2, "Hyperion".to_string(), "Simmons".to_string());
        borrowed.status = BookStatus::Borrowed;
        borrowed.borrower = "alice".to_string();
        borrowed.due_date = "2026-08-13".to_string();

        vec![
            Book::new(1, "Dune".to_string(), "Herbert".to_string()),
            borrowed,
        ]
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty_catalog() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path().join("database.json"));

        let books = store.load().await.unwrap();
        assert!(books.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path().join("database.json"));

        let catalog = sample_catalog();
        store.save(&catalog).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, catalog);
    }

    #[tokio::test]
    async fn resave_of_unchanged_catalog_is_byte_stable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("database.json");
        let store = FileCatalogStore::new(&path);

        store.save(&sample_catalog()).await.unwrap();
        let first = tokio::fs::read(&path).await.unwrap();

        let loaded = store.load().await.unwrap();
        store.save(&loaded).await.unwrap();
        let second = tokio::fs::read(&path).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn save_replaces_previous_catalog_wholesale() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path().join("database.json"));

        store.save(&sample_catalog()).await.unwrap();
        let shorter = vec![Book::new(9, "Solaris".to_string(), "Lem".to_string())];
        store.save(&shorter).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, shorter);
    }

    #[tokio::test]
    async fn unparseable_file_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("database.json");
        tokio::fs::write(&path, b"{ not a catalog").await.unwrap();

        let store = FileCatalogStore::new(&path);
        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn persisted_file_uses_original_field_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("database.json");
        let store = FileCatalogStore::new(&path);

        store.save(&sample_catalog()).await.unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(text.contains("\"dueDate\""));
        assert!(text.contains("\"borrower\""));
        assert!(text.contains("\"Available\""));
    }
}
