//! Lending service: the load-mutate-save cycle over the catalog

use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;

use crate::{
    config::LendingConfig,
    error::{AppError, AppResult},
    models::book::{Book, BorrowBook, CreateBook, DEFAULT_BORROWER},
    repository::CatalogStore,
};

/// Business logic for the book catalog.
///
/// Every mutation performs one full load → locate/validate → mutate → save
/// cycle against the store. Cycles are serialized through a single write
/// lock so two concurrent mutations cannot silently overwrite each other's
/// saved catalog; reads go straight to the store.
#[derive(Clone)]
pub struct LendingService {
    store: Arc<dyn CatalogStore>,
    loan_period_days: i64,
    write_lock: Arc<Mutex<()>>,
}

impl LendingService {
    pub fn new(store: Arc<dyn CatalogStore>, config: LendingConfig) -> Self {
        Self {
            store,
            loan_period_days: config.loan_period_days,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the full catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.store.load().await
    }

    /// Get a single book by id
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        let books = self.store.load().await?;
        let idx = position(&books, id)?;
        Ok(books[idx].clone())
    }

    /// Add a book to the catalog.
    ///
    /// The id is assigned as one past the highest existing id (1 for an
    /// empty catalog); status, borrower and due date start at their
    /// available-state values whatever the client sent.
    pub async fn add_book(&self, input: CreateBook) -> AppResult<Book> {
        let _guard = self.write_lock.lock().await;

        let mut books = self.store.load().await?;
        let book = Book::new(next_book_id(&books), input.name, input.author);
        books.push(book.clone());
        self.store.save(&books).await?;

        tracing::info!(id = book.id, name = %book.name, "added book");
        Ok(book)
    }

    /// Borrow a book.
    ///
    /// An absent `borrower` field is recorded as "unknown"; an explicitly
    /// empty string is kept as supplied. The due date becomes today plus
    /// the configured loan period.
    pub async fn borrow_book(&self, id: i32, request: BorrowBook) -> AppResult<Book> {
        let borrower = request
            .borrower
            .unwrap_or_else(|| DEFAULT_BORROWER.to_string());
        let today = Local::now().date_naive();

        let _guard = self.write_lock.lock().await;

        let mut books = self.store.load().await?;
        let idx = position(&books, id)?;
        books[idx].check_out(&borrower, today, self.loan_period_days)?;
        self.store.save(&books).await?;

        tracing::info!(id, borrower = %books[idx].borrower, due = %books[idx].due_date, "borrowed book");
        Ok(books[idx].clone())
    }

    /// Return a book. Idempotent on an already-available book.
    pub async fn return_book(&self, id: i32) -> AppResult<Book> {
        let _guard = self.write_lock.lock().await;

        let mut books = self.store.load().await?;
        let idx = position(&books, id)?;
        books[idx].check_in();
        self.store.save(&books).await?;

        tracing::info!(id, "returned book");
        Ok(books[idx].clone())
    }

    /// Renew a loan: the due date moves one loan period past the stored
    /// due date, not past today.
    pub async fn renew_book(&self, id: i32) -> AppResult<Book> {
        let _guard = self.write_lock.lock().await;

        let mut books = self.store.load().await?;
        let idx = position(&books, id)?;
        books[idx].renew(self.loan_period_days)?;
        self.store.save(&books).await?;

        tracing::info!(id, due = %books[idx].due_date, "renewed loan");
        Ok(books[idx].clone())
    }
}

/// Next server-assigned id: max existing id + 1, or 1 for an empty catalog
fn next_book_id(books: &[Book]) -> i32 {
    books.iter().map(|b| b.id).max().unwrap_or(0) + 1
}

/// Position of the book with the given id, preserving catalog order
fn position(books: &[Book], id: i32) -> AppResult<usize> {
    books
        .iter()
        .position(|b| b.id == id)
        .ok_or_else(|| AppError::NotFound(format!("book with id {} not found", id)))
}
