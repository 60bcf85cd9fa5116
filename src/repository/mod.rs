//! In-memory store for the catalog and the borrowing ledger.
//!
//! Both collections live behind one `RwLock`, so every mutating operation is
//! a single critical section: a borrow can never be observed with the copy
//! counter incremented but the record missing, and two concurrent borrows
//! cannot both see the last available copy. Reads clone a snapshot and are
//! evaluated by the pure query layer.

pub mod books;
pub mod loans;
pub mod seed;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::models::{Book, BorrowRecord};

/// Owned catalog and ledger collections. Insertion order is kept so
/// unqueried listings come back in creation order.
#[derive(Debug, Default)]
pub struct LibraryState {
    pub books: IndexMap<i64, Book>,
    pub records: IndexMap<i64, BorrowRecord>,
    next_book_id: i64,
    next_record_id: i64,
}

impl LibraryState {
    pub fn next_book_id(&mut self) -> i64 {
        self.next_book_id += 1;
        self.next_book_id
    }

    pub fn next_record_id(&mut self) -> i64 {
        self.next_record_id += 1;
        self.next_record_id
    }
}

type Shared = Arc<RwLock<LibraryState>>;

/// Main repository struct holding the shared state
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    pub fn new() -> Self {
        let state: Shared = Arc::new(RwLock::new(LibraryState::default()));
        Self {
            books: books::BooksRepository::new(state.clone()),
            loans: loans::LoansRepository::new(state),
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn read_state(state: &Shared) -> RwLockReadGuard<'_, LibraryState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_state(state: &Shared) -> RwLockWriteGuard<'_, LibraryState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}
