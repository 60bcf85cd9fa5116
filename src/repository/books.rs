//! Catalog store operations

use std::sync::{Arc, RwLock};

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::book::{Book, CreateBook, UpdateBook},
};

use super::{read_state, write_state, LibraryState};

#[derive(Clone)]
pub struct BooksRepository {
    state: Arc<RwLock<LibraryState>>,
}

impl BooksRepository {
    pub fn new(state: Arc<RwLock<LibraryState>>) -> Self {
        Self { state }
    }

    /// Snapshot of the whole catalog in creation order
    pub fn list(&self) -> Vec<Book> {
        read_state(&self.state).books.values().cloned().collect()
    }

    /// Get a book by ID
    pub fn get(&self, id: i64) -> AppResult<Book> {
        read_state(&self.state)
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(ErrorCode::NoSuchBook, format!("Book with id {} not found", id))
            })
    }

    /// Insert a new catalog entry. Input fields are expected to be validated
    /// by the caller; ISBN uniqueness is enforced here, inside the lock.
    pub fn insert(&self, book: &CreateBook) -> AppResult<Book> {
        let mut state = write_state(&self.state);

        if state.books.values().any(|b| b.isbn == book.isbn) {
            return Err(AppError::Conflict(
                ErrorCode::DuplicateIsbn,
                format!("A book with ISBN {} already exists", book.isbn),
            ));
        }

        let id = state.next_book_id();
        let created = Book {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            category: book.category.clone(),
            published_year: book.published_year,
            total_copies: book.total_copies,
            borrowed_copies: 0,
        };
        state.books.insert(id, created.clone());
        Ok(created)
    }

    /// Apply a partial update. The copy counters stay consistent: the total
    /// can never drop below the number of copies currently out.
    pub fn update(&self, id: i64, patch: &UpdateBook) -> AppResult<Book> {
        let mut state = write_state(&self.state);

        let current = state
            .books
            .get(&id)
            .ok_or_else(|| {
                AppError::NotFound(ErrorCode::NoSuchBook, format!("Book with id {} not found", id))
            })?;

        if let Some(total) = patch.total_copies {
            if total < current.borrowed_copies {
                return Err(AppError::Validation(format!(
                    "total_copies: cannot be lower than the {} copies currently borrowed",
                    current.borrowed_copies
                )));
            }
        }

        if let Some(ref isbn) = patch.isbn {
            if state.books.values().any(|b| b.id != id && &b.isbn == isbn) {
                return Err(AppError::Conflict(
                    ErrorCode::DuplicateIsbn,
                    format!("A book with ISBN {} already exists", isbn),
                ));
            }
        }

        let book = state
            .books
            .get_mut(&id)
            .ok_or_else(|| {
                AppError::NotFound(ErrorCode::NoSuchBook, format!("Book with id {} not found", id))
            })?;

        if let Some(ref title) = patch.title {
            book.title = title.clone();
        }
        if let Some(ref author) = patch.author {
            book.author = author.clone();
        }
        if let Some(ref isbn) = patch.isbn {
            book.isbn = isbn.clone();
        }
        if let Some(ref category) = patch.category {
            book.category = category.clone();
        }
        if let Some(year) = patch.published_year {
            book.published_year = year;
        }
        if let Some(total) = patch.total_copies {
            book.total_copies = total;
        }

        Ok(book.clone())
    }

    /// Remove a book. Refused while any copy is still out, so no ledger
    /// record can ever point at a missing catalog entry.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let mut state = write_state(&self.state);

        let book = state
            .books
            .get(&id)
            .ok_or_else(|| {
                AppError::NotFound(ErrorCode::NoSuchBook, format!("Book with id {} not found", id))
            })?;

        if book.borrowed_copies > 0 {
            return Err(AppError::Conflict(
                ErrorCode::BookHasOpenLoans,
                format!("Book {} still has {} borrowed copies", id, book.borrowed_copies),
            ));
        }

        state.books.shift_remove(&id);
        Ok(())
    }
}
