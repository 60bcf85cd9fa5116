//! Borrowing engine: borrow, return and renew.
//!
//! Each operation takes the write lock once, validates everything, then
//! applies the whole change. On any failure nothing has been touched.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::borrow::{money, BorrowRecord, Borrower},
};

use super::{read_state, write_state, LibraryState};

#[derive(Clone)]
pub struct LoansRepository {
    state: Arc<RwLock<LibraryState>>,
}

impl LoansRepository {
    pub fn new(state: Arc<RwLock<LibraryState>>) -> Self {
        Self { state }
    }

    /// Snapshot of the whole ledger
    pub fn list(&self) -> Vec<BorrowRecord> {
        read_state(&self.state).records.values().cloned().collect()
    }

    /// Snapshot of one borrower's records
    pub fn for_borrower(&self, borrower_id: i64) -> Vec<BorrowRecord> {
        read_state(&self.state)
            .records
            .values()
            .filter(|r| r.borrower_id == borrower_id)
            .cloned()
            .collect()
    }

    /// Get a record by ID
    pub fn get(&self, id: i64) -> AppResult<BorrowRecord> {
        read_state(&self.state)
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(
                    ErrorCode::NoSuchRecord,
                    format!("Borrow record with id {} not found", id),
                )
            })
    }

    /// Borrow one copy of a book: increments the book's borrowed counter and
    /// appends a ledger record, atomically.
    pub fn borrow(
        &self,
        book_id: i64,
        borrower: &Borrower,
        now: DateTime<Utc>,
        loan_period_days: i64,
    ) -> AppResult<BorrowRecord> {
        let mut state = write_state(&self.state);

        let book = state
            .books
            .get(&book_id)
            .ok_or_else(|| {
                AppError::NotFound(
                    ErrorCode::NoSuchBook,
                    format!("Book with id {} not found", book_id),
                )
            })?;

        if book.available_copies() == 0 {
            return Err(AppError::Conflict(
                ErrorCode::NoCopiesAvailable,
                format!("No copies of \"{}\" are available", book.title),
            ));
        }

        // One open record per (borrower, book): the same borrower must return
        // a title before borrowing it again.
        if state
            .records
            .values()
            .any(|r| r.is_open() && r.borrower_id == borrower.id && r.book_id == book_id)
        {
            return Err(AppError::Conflict(
                ErrorCode::AlreadyBorrowed,
                format!(
                    "Borrower {} already has an open loan for \"{}\"",
                    borrower.id, book.title
                ),
            ));
        }

        let record = BorrowRecord {
            id: 0, // assigned below, once nothing can fail anymore
            book_id,
            book_title: book.title.clone(),
            book_author: book.author.clone(),
            isbn: book.isbn.clone(),
            borrower_id: borrower.id,
            borrower_name: borrower.name.clone(),
            borrower_email: borrower.email.clone(),
            borrowed_date: now,
            due_date: now + Duration::days(loan_period_days),
            returned_date: None,
            fine_amount: Decimal::ZERO,
        };

        let id = state.next_record_id();
        if let Some(book) = state.books.get_mut(&book_id) {
            book.borrowed_copies += 1;
        }
        let record = BorrowRecord { id, ..record };
        state.records.insert(id, record.clone());

        tracing::info!(book_id, borrower_id = borrower.id, record_id = id, "copy borrowed");
        Ok(record)
    }

    /// Return a borrowed copy: sets the returned date, finalizes the fine and
    /// gives the copy back to the catalog, atomically.
    pub fn return_book(
        &self,
        record_id: i64,
        now: DateTime<Utc>,
        daily_rate: Decimal,
    ) -> AppResult<BorrowRecord> {
        let mut state = write_state(&self.state);

        let record = state
            .records
            .get(&record_id)
            .ok_or_else(|| {
                AppError::NotFound(
                    ErrorCode::NoSuchRecord,
                    format!("Borrow record with id {} not found", record_id),
                )
            })?;

        if !record.is_open() {
            return Err(AppError::Conflict(
                ErrorCode::AlreadyReturned,
                format!("Borrow record {} was already returned", record_id),
            ));
        }

        let book_id = record.book_id;
        let days_late = (now - record.due_date).num_days().max(0);

        let record = state
            .records
            .get_mut(&record_id)
            .ok_or_else(|| {
                AppError::NotFound(
                    ErrorCode::NoSuchRecord,
                    format!("Borrow record with id {} not found", record_id),
                )
            })?;
        record.returned_date = Some(now);
        record.fine_amount = money(Decimal::from(days_late) * daily_rate);
        let returned = record.clone();

        // The book is guaranteed to exist while its copies are out; deletion
        // is refused until borrowed_copies reaches zero.
        let book = state.books.get_mut(&book_id).ok_or_else(|| {
            AppError::Internal(format!("catalog entry {} missing for record {}", book_id, record_id))
        })?;
        book.borrowed_copies -= 1;

        tracing::info!(record_id, book_id, days_late, "copy returned");
        Ok(returned)
    }

    /// Renew an open loan: pushes the due date out from now (or from the old
    /// due date if that is later) and resets the fine. Copy counters are
    /// untouched.
    pub fn renew(
        &self,
        record_id: i64,
        now: DateTime<Utc>,
        extension_days: i64,
    ) -> AppResult<BorrowRecord> {
        let mut state = write_state(&self.state);

        let record = state
            .records
            .get_mut(&record_id)
            .ok_or_else(|| {
                AppError::NotFound(
                    ErrorCode::NoSuchRecord,
                    format!("Borrow record with id {} not found", record_id),
                )
            })?;

        if !record.is_open() {
            return Err(AppError::Conflict(
                ErrorCode::AlreadyReturned,
                format!("Borrow record {} was already returned", record_id),
            ));
        }

        record.due_date = record.due_date.max(now) + Duration::days(extension_days);
        record.fine_amount = money(Decimal::ZERO);

        tracing::info!(record_id, due_date = %record.due_date, "loan renewed");
        Ok(record.clone())
    }
}
