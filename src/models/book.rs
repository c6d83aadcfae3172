//! Book model and lending state transitions

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Date format used for due dates in the persisted catalog and on the wire
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Borrower recorded when a borrow request names nobody
pub const DEFAULT_BORROWER: &str = "unknown";

/// Lending status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Available
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookStatus::Available => "Available",
            BookStatus::Borrowed => "Borrowed",
        };
        write!(f, "{}", label)
    }
}

/// Catalog entry.
///
/// `borrower` and `due_date` are empty strings while the book is available.
/// The due date is kept as the raw persisted string rather than a parsed
/// date so a hand-edited catalog only fails at the renew operation that
/// actually reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub status: BookStatus,
    pub borrower: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
}

impl Book {
    /// Create a fresh catalog entry. Status, borrower and due date are
    /// forced to their available-state values regardless of client input.
    pub fn new(id: i32, name: String, author: String) -> Self {
        Self {
            id,
            name,
            author,
            status: BookStatus::Available,
            borrower: String::new(),
            due_date: String::new(),
        }
    }

    /// Borrow this book.
    ///
    /// Fails with a conflict when the book is not available. The due date
    /// becomes `today + period_days` calendar days.
    pub fn check_out(
        &mut self,
        borrower: &str,
        today: NaiveDate,
        period_days: i64,
    ) -> AppResult<()> {
        if self.status != BookStatus::Available {
            return Err(AppError::Conflict("book not available".to_string()));
        }

        self.status = BookStatus::Borrowed;
        self.borrower = borrower.to_string();
        self.due_date = (today + Duration::days(period_days))
            .format(DUE_DATE_FORMAT)
            .to_string();
        Ok(())
    }

    /// Return this book.
    ///
    /// No status precondition: returning an already-available book is an
    /// idempotent no-op that leaves the fields at their reset values.
    pub fn check_in(&mut self) {
        self.status = BookStatus::Available;
        self.borrower.clear();
        self.due_date.clear();
    }

    /// Extend the loan by `period_days` from the current due date.
    ///
    /// Fails with a conflict when the book is not borrowed, and with an
    /// invalid-state error when the stored due date does not parse (possible
    /// only if the persisted catalog was corrupted or hand-edited).
    pub fn renew(&mut self, period_days: i64) -> AppResult<()> {
        if self.status != BookStatus::Borrowed {
            return Err(AppError::Conflict("book is not borrowed".to_string()));
        }

        let due = NaiveDate::parse_from_str(&self.due_date, DUE_DATE_FORMAT).map_err(|_| {
            AppError::InvalidState(format!(
                "book {} has unparseable due date {:?}",
                self.id, self.due_date
            ))
        })?;

        self.due_date = (due + Duration::days(period_days))
            .format(DUE_DATE_FORMAT)
            .to_string();
        Ok(())
    }
}

/// Create book request. Absent fields are accepted as empty strings; any
/// client-supplied id or status is ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateBook {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
}

/// Borrow request body. The whole body is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BorrowBook {
    /// Name of the borrower; recorded as "unknown" when absent
    pub borrower: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_book_is_available_with_empty_fields() {
        let book = Book::new(1, "Dune".to_string(), "Herbert".to_string());
        assert_eq!(book.status, BookStatus::Available);
        assert_eq!(book.borrower, "");
        assert_eq!(book.due_date, "");
    }

    #[test]
    fn check_out_sets_borrower_and_due_date() {
        let mut book = Book::new(1, "Dune".to_string(), "Herbert".to_string());
        book.check_out("alice", day(2026, 8, 6), 7).unwrap();

        assert_eq!(book.status, BookStatus::Borrowed);
        assert_eq!(book.borrower, "alice");
        assert_eq!(book.due_date, "2026-08-13");
    }

    #[test]
    fn check_out_rolls_over_month_and_year() {
        let mut book = Book::new(1, "Dune".to_string(), "Herbert".to_string());
        book.check_out("alice", day(2026, 12, 28), 7).unwrap();
        assert_eq!(book.due_date, "2027-01-04");
    }

    #[test]
    fn check_out_borrowed_book_is_a_conflict() {
        let mut book = Book::new(1, "Dune".to_string(), "Herbert".to_string());
        book.check_out("alice", day(2026, 8, 6), 7).unwrap();

        let err = book.check_out("bob", day(2026, 8, 7), 7).unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == "book not available"));
        // first borrower untouched
        assert_eq!(book.borrower, "alice");
    }

    #[test]
    fn check_in_resets_lending_fields() {
        let mut book = Book::new(1, "Dune".to_string(), "Herbert".to_string());
        book.check_out("alice", day(2026, 8, 6), 7).unwrap();
        book.check_in();

        assert_eq!(book.status, BookStatus::Available);
        assert_eq!(book.borrower, "");
        assert_eq!(book.due_date, "");
    }

    #[test]
    fn check_in_available_book_is_idempotent() {
        let mut book = Book::new(1, "Dune".to_string(), "Herbert".to_string());
        book.check_in();
        assert_eq!(book.status, BookStatus::Available);
        assert_eq!(book.borrower, "");
        assert_eq!(book.due_date, "");
    }

    #[test]
    fn renew_extends_from_stored_due_date() {
        let mut book = Book::new(1, "Dune".to_string(), "Herbert".to_string());
        book.check_out("alice", day(2026, 8, 6), 7).unwrap();

        book.renew(7).unwrap();
        assert_eq!(book.due_date, "2026-08-20");

        book.renew(7).unwrap();
        assert_eq!(book.due_date, "2026-08-27");
    }

    #[test]
    fn renew_available_book_is_a_conflict() {
        let mut book = Book::new(1, "Dune".to_string(), "Herbert".to_string());
        let err = book.renew(7).unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == "book is not borrowed"));
    }

    #[test]
    fn renew_with_corrupt_due_date_is_invalid_state() {
        let mut book = Book::new(1, "Dune".to_string(), "Herbert".to_string());
        book.status = BookStatus::Borrowed;
        book.borrower = "alice".to_string();
        book.due_date = "next tuesday".to_string();

        let err = book.renew(7).unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[test]
    fn book_serializes_with_original_field_names() {
        let mut book = Book::new(1, "Dune".to_string(), "Herbert".to_string());
        book.check_out("alice", day(2026, 8, 6), 7).unwrap();

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Dune",
                "author": "Herbert",
                "status": "Borrowed",
                "borrower": "alice",
                "dueDate": "2026-08-13",
            })
        );
    }
}
