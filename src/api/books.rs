//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{BookQuery, BookResponse, CreateBook, UpdateBook},
};

use super::CallerIdentity;

/// Catalog listing response
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    /// Books matching the query
    pub books: Vec<BookResponse>,
    /// Number of matches
    pub total: usize,
}

/// List books with search and filters
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookListResponse>> {
    let books = state.services.catalog.search_books(&query);
    let total = books.len();
    Ok(Json(BookListResponse { books, total }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookResponse>> {
    Ok(Json(state.services.catalog.get_book(id)?))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid book data"),
        (status = 403, description = "Librarian role required"),
        (status = 409, description = "Duplicate ISBN")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    identity: CallerIdentity,
    Json(request): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    identity.require_librarian()?;

    let book = state.services.catalog.create_book(request)?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a catalog entry
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid patch"),
        (status = 403, description = "Librarian role required"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Duplicate ISBN")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    identity: CallerIdentity,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBook>,
) -> AppResult<Json<BookResponse>> {
    identity.require_librarian()?;

    Ok(Json(state.services.catalog.update_book(id, request)?))
}

/// Remove a book from the catalog
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 403, description = "Librarian role required"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book has borrowed copies")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    identity: CallerIdentity,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    identity.require_librarian()?;

    state.services.catalog.delete_book(id)?;
    Ok(StatusCode::NO_CONTENT)
}
