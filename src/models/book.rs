//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Catalog entry as held by the store.
///
/// `borrowed_copies` is the only mutable counter; the number of available
/// copies is always derived from it (see [`Book::available_copies`]) and is
/// never stored, so the two cannot drift apart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,
    pub published_year: i32,
    pub total_copies: u32,
    pub borrowed_copies: u32,
}

impl Book {
    /// Copies currently on the shelf
    pub fn available_copies(&self) -> u32 {
        self.total_copies - self.borrowed_copies
    }
}

/// Book representation returned by the API, with the derived availability
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,
    pub published_year: i32,
    pub total_copies: u32,
    pub borrowed_copies: u32,
    pub available_copies: u32,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            category: book.category.clone(),
            published_year: book.published_year,
            total_copies: book.total_copies,
            borrowed_copies: book.borrowed_copies,
            available_copies: book.available_copies(),
        }
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    /// Checked against the current year in the service layer
    #[validate(range(min = 1, message = "must be a positive year"))]
    pub published_year: i32,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub total_copies: u32,
}

/// Update book request. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub author: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub isbn: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: Option<String>,
    #[validate(range(min = 1, message = "must be a positive year"))]
    pub published_year: Option<i32>,
    pub total_copies: Option<u32>,
}

/// Availability filter for catalog queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    All,
    Available,
    Unavailable,
}

/// Catalog query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring match on title, author, ISBN and category
    pub search: Option<String>,
    /// Exact category match; omit or pass "all" to disable
    pub category: Option<String>,
    #[serde(default)]
    pub availability: Availability,
}
