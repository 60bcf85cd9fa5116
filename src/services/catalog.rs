//! Catalog management service

use std::sync::Arc;

use chrono::Datelike;
use validator::Validate;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::book::{BookQuery, BookResponse, CreateBook, UpdateBook},
    query,
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Search books with filters
    pub fn search_books(&self, query: &BookQuery) -> Vec<BookResponse> {
        query::search_books(self.repository.books.list(), query)
            .iter()
            .map(BookResponse::from)
            .collect()
    }

    /// Get book by ID
    pub fn get_book(&self, id: i64) -> AppResult<BookResponse> {
        Ok(BookResponse::from(&self.repository.books.get(id)?))
    }

    /// Create a new book
    pub fn create_book(&self, book: CreateBook) -> AppResult<BookResponse> {
        book.validate()?;
        self.check_year(book.published_year)?;

        let created = self.repository.books.insert(&book)?;
        tracing::info!(book_id = created.id, isbn = %created.isbn, "book created");
        Ok(BookResponse::from(&created))
    }

    /// Update an existing book
    pub fn update_book(&self, id: i64, patch: UpdateBook) -> AppResult<BookResponse> {
        patch.validate()?;
        if let Some(year) = patch.published_year {
            self.check_year(year)?;
        }

        let updated = self.repository.books.update(id, &patch)?;
        tracing::info!(book_id = id, "book updated");
        Ok(BookResponse::from(&updated))
    }

    /// Delete a book. Fails while any copy is still borrowed.
    pub fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id)?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }

    /// The year bound depends on the clock, so it cannot live in the
    /// derive-based validation on the request type.
    fn check_year(&self, year: i32) -> AppResult<()> {
        let current_year = self.clock.now().year();
        if year < 1 || year > current_year {
            return Err(AppError::Validation(format!(
                "published_year: must be between 1 and {}",
                current_year
            )));
        }
        Ok(())
    }
}
