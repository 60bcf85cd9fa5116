//! Data models for Libris

pub mod book;
pub mod borrow;

// Re-export commonly used types
pub use book::{Book, BookQuery, BookResponse, CreateBook, UpdateBook};
pub use borrow::{BorrowRecord, BorrowStatus, Borrower, RecordDetails, RecordQuery};
