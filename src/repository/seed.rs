//! Demonstration catalog, loaded at startup when `catalog.seed_demo` is set

use crate::error::AppResult;
use crate::models::book::CreateBook;

use super::Repository;

/// The classic demo titles, a few copies each
pub fn seed_demo_catalog(repository: &Repository) -> AppResult<()> {
    let books = [
        CreateBook {
            title: "The Great Gatsby".into(),
            author: "F. Scott Fitzgerald".into(),
            isbn: "978-0-7432-7356-5".into(),
            category: "Literature".into(),
            published_year: 1925,
            total_copies: 3,
        },
        CreateBook {
            title: "To Kill a Mockingbird".into(),
            author: "Harper Lee".into(),
            isbn: "978-0-06-112008-4".into(),
            category: "Literature".into(),
            published_year: 1960,
            total_copies: 4,
        },
        CreateBook {
            title: "1984".into(),
            author: "George Orwell".into(),
            isbn: "978-0-452-28423-4".into(),
            category: "Fiction".into(),
            published_year: 1949,
            total_copies: 5,
        },
        CreateBook {
            title: "A Brief History of Time".into(),
            author: "Stephen Hawking".into(),
            isbn: "978-0-553-38016-3".into(),
            category: "Science".into(),
            published_year: 1988,
            total_copies: 2,
        },
        CreateBook {
            title: "Pride and Prejudice".into(),
            author: "Jane Austen".into(),
            isbn: "978-0-14-143951-8".into(),
            category: "Literature".into(),
            published_year: 1813,
            total_copies: 3,
        },
    ];

    for book in &books {
        repository.books.insert(book)?;
    }

    tracing::info!(count = books.len(), "demo catalog seeded");
    Ok(())
}
