//! Pure filter/sort/search functions over catalog and ledger snapshots.
//!
//! Everything here is a function of its inputs; no locks, no clock other than
//! the `now` passed in. Both the borrower and the librarian views go through
//! these.

use chrono::{DateTime, Utc};

use crate::models::book::{Availability, Book, BookQuery};
use crate::models::borrow::{BorrowRecord, RecordQuery, SortField, SortOrder, StatusFilter};

/// Filter books by free-text search, category and availability.
/// The search term matches title, author, ISBN or category, case-insensitively;
/// the category filter is an exact match. All filters are ANDed.
pub fn search_books(mut books: Vec<Book>, query: &BookQuery) -> Vec<Book> {
    if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
        let term = term.to_lowercase();
        books.retain(|b| {
            b.title.to_lowercase().contains(&term)
                || b.author.to_lowercase().contains(&term)
                || b.isbn.to_lowercase().contains(&term)
                || b.category.to_lowercase().contains(&term)
        });
    }

    if let Some(category) = query.category.as_deref().filter(|c| *c != "all") {
        books.retain(|b| b.category == category);
    }

    match query.availability {
        Availability::All => {}
        Availability::Available => books.retain(|b| b.available_copies() > 0),
        Availability::Unavailable => books.retain(|b| b.available_copies() == 0),
    }

    books
}

/// Filter borrow records by derived status and free-text search.
/// The term matches book title/author, borrower name/email or ISBN.
pub fn filter_records(
    mut records: Vec<BorrowRecord>,
    status: StatusFilter,
    search: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<BorrowRecord> {
    if let Some(term) = search.filter(|t| !t.is_empty()) {
        let term = term.to_lowercase();
        records.retain(|r| {
            r.book_title.to_lowercase().contains(&term)
                || r.book_author.to_lowercase().contains(&term)
                || r.borrower_name.to_lowercase().contains(&term)
                || r.borrower_email.to_lowercase().contains(&term)
                || r.isbn.to_lowercase().contains(&term)
        });
    }

    if status != StatusFilter::All {
        records.retain(|r| status.matches(r.status_at(now)));
    }

    records
}

/// Sort records in place. The sort is stable, so ties keep their prior
/// relative order. A missing returned date sorts as the maximum date:
/// last ascending, first descending.
pub fn sort_records(records: &mut [BorrowRecord], field: SortField, order: SortOrder) {
    fn date_key(date: Option<DateTime<Utc>>) -> DateTime<Utc> {
        date.unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    records.sort_by(|a, b| {
        let ordering = match field {
            SortField::BorrowedDate => a.borrowed_date.cmp(&b.borrowed_date),
            SortField::DueDate => a.due_date.cmp(&b.due_date),
            SortField::ReturnedDate => date_key(a.returned_date).cmp(&date_key(b.returned_date)),
            SortField::BookTitle => a.book_title.to_lowercase().cmp(&b.book_title.to_lowercase()),
            SortField::BorrowerName => a
                .borrower_name
                .to_lowercase()
                .cmp(&b.borrower_name.to_lowercase()),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Apply a full record query: filter, then sort
pub fn apply_record_query(
    records: Vec<BorrowRecord>,
    query: &RecordQuery,
    now: DateTime<Utc>,
) -> Vec<BorrowRecord> {
    let mut records = filter_records(records, query.status, query.search.as_deref(), now);
    sort_records(&mut records, query.sort_by, query.order);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
    }

    fn book(id: i64, title: &str, category: &str, total: u32, borrowed: u32) -> Book {
        Book {
            id,
            title: title.into(),
            author: "Author".into(),
            isbn: format!("isbn-{}", id),
            category: category.into(),
            published_year: 1990,
            total_copies: total,
            borrowed_copies: borrowed,
        }
    }

    fn rec(id: i64, title: &str, due: i64, returned: Option<i64>) -> BorrowRecord {
        BorrowRecord {
            id,
            book_id: id,
            book_title: title.into(),
            book_author: "Author".into(),
            isbn: format!("isbn-{}", id),
            borrower_id: 1,
            borrower_name: "Jane Smith".into(),
            borrower_email: "jane.smith@email.com".into(),
            borrowed_date: day(0),
            due_date: day(due),
            returned_date: returned.map(day),
            fine_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn search_matches_all_text_fields_case_insensitively() {
        let books = vec![
            book(1, "The Great Gatsby", "Literature", 3, 0),
            book(2, "A Brief History of Time", "Science", 2, 0),
        ];
        let query = BookQuery {
            search: Some("gatsby".into()),
            ..Default::default()
        };
        let found = search_books(books.clone(), &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);

        let query = BookQuery {
            search: Some("SCIENCE".into()),
            ..Default::default()
        };
        assert_eq!(search_books(books, &query).len(), 1);
    }

    #[test]
    fn category_and_search_filters_are_anded() {
        let books = vec![
            book(1, "Gatsby", "Literature", 3, 0),
            book(2, "Mockingbird", "Literature", 2, 0),
        ];
        let query = BookQuery {
            search: Some("gatsby".into()),
            category: Some("Literature".into()),
            ..Default::default()
        };
        assert_eq!(search_books(books.clone(), &query).len(), 1);

        let query = BookQuery {
            search: Some("gatsby".into()),
            category: Some("Science".into()),
            ..Default::default()
        };
        assert!(search_books(books, &query).is_empty());
    }

    #[test]
    fn category_all_disables_the_filter() {
        let books = vec![book(1, "Gatsby", "Literature", 3, 0)];
        let query = BookQuery {
            category: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(search_books(books, &query).len(), 1);
    }

    #[test]
    fn availability_filter_uses_derived_copies() {
        let books = vec![
            book(1, "Gatsby", "Literature", 3, 3),
            book(2, "Mockingbird", "Literature", 2, 1),
        ];
        let query = BookQuery {
            availability: Availability::Available,
            ..Default::default()
        };
        let found = search_books(books.clone(), &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);

        let query = BookQuery {
            availability: Availability::Unavailable,
            ..Default::default()
        };
        let found = search_books(books, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn status_filter_uses_derived_status() {
        // regardless of insertion order, the overdue filter returns exactly
        // the records whose derived status is overdue at `now`
        let records = vec![
            rec(1, "A", 30, None),          // overdue at day 45
            rec(2, "B", 60, None),          // active at day 45
            rec(3, "C", 30, Some(40)),      // returned
            rec(4, "D", 10, None),          // overdue at day 45
        ];
        let found = filter_records(records, StatusFilter::Overdue, None, day(45));
        let ids: Vec<i64> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn record_search_matches_borrower_and_book_fields() {
        let records = vec![rec(1, "Gatsby", 30, None), rec(2, "Mockingbird", 30, None)];
        let found = filter_records(records.clone(), StatusFilter::All, Some("mocking"), day(0));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);

        // borrower email matches every record here
        let found = filter_records(records, StatusFilter::All, Some("jane.smith"), day(0));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn sort_by_due_date_ascending_and_descending() {
        let mut records = vec![rec(1, "A", 30, None), rec(2, "B", 10, None), rec(3, "C", 20, None)];
        sort_records(&mut records, SortField::DueDate, SortOrder::Asc);
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        sort_records(&mut records, SortField::DueDate, SortOrder::Desc);
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn missing_returned_date_sorts_as_the_maximum_date() {
        let mut records = vec![rec(1, "A", 30, None), rec(2, "B", 30, Some(35))];
        sort_records(&mut records, SortField::ReturnedDate, SortOrder::Asc);
        assert_eq!(records[0].id, 2);
        assert_eq!(records[1].id, 1);

        sort_records(&mut records, SortField::ReturnedDate, SortOrder::Desc);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn equal_keys_preserve_prior_relative_order() {
        let mut records = vec![
            rec(1, "Same", 30, None),
            rec(2, "Same", 30, None),
            rec(3, "Same", 30, None),
        ];
        sort_records(&mut records, SortField::BookTitle, SortOrder::Asc);
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
