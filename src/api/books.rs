//! Book catalog and lending endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BorrowBook, CreateBook},
};

/// List the full catalog
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Full catalog", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.lending.list_books().await?;
    Ok(Json(books))
}

/// Get a single book by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.lending.get_book(id).await?;
    Ok(Json(book))
}

/// Add a book to the catalog.
///
/// The id is server-assigned and the book starts available; any status or
/// lending fields in the request are ignored.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(input): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.lending.add_book(input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/books/{id}/borrow",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BorrowBook,
    responses(
        (status = 200, description = "Book borrowed", body = Book),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book not available")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    request: Option<Json<BorrowBook>>,
) -> AppResult<Json<Book>> {
    let request = request.map(|Json(r)| r).unwrap_or_default();

    let book = state.services.lending.borrow_book(id, request).await?;
    Ok(Json(book))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/books/{id}/return",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.lending.return_book(id).await?;
    Ok(Json(book))
}

/// Renew a loan
#[utoipa::path(
    post,
    path = "/books/{id}/renew",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Loan renewed", body = Book),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book is not borrowed")
    )
)]
pub async fn renew_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.lending.renew_book(id).await?;
    Ok(Json(book))
}
