//! Statistics service for the dashboards

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    api::stats::{CatalogStats, LoanStats, StatsResponse},
    clock::Clock,
    config::LoanPolicy,
    models::borrow::BorrowStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    policy: LoanPolicy,
    clock: Arc<dyn Clock>,
}

impl StatsService {
    pub fn new(repository: Repository, policy: LoanPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            policy,
            clock,
        }
    }

    /// Snapshot totals for the librarian dashboard
    pub fn get_stats(&self) -> StatsResponse {
        let now = self.clock.now();
        let books = self.repository.books.list();
        let records = self.repository.loans.list();

        let categories: BTreeSet<&str> = books.iter().map(|b| b.category.as_str()).collect();
        let catalog = CatalogStats {
            total_books: books.len() as i64,
            total_copies: books.iter().map(|b| i64::from(b.total_copies)).sum(),
            available_copies: books.iter().map(|b| i64::from(b.available_copies())).sum(),
            categories: categories.len() as i64,
        };

        let mut loans = LoanStats {
            active: 0,
            overdue: 0,
            returned: 0,
            outstanding_fines: rust_decimal::Decimal::ZERO,
        };
        for record in &records {
            match record.status_at(now) {
                BorrowStatus::Active => loans.active += 1,
                BorrowStatus::Overdue => {
                    loans.overdue += 1;
                    loans.outstanding_fines += record.fine_at(now, self.policy.daily_fine_rate);
                }
                BorrowStatus::Returned => loans.returned += 1,
            }
        }

        StatsResponse { catalog, loans }
    }

    /// Raw store sizes (titles in the catalog, open records) for readiness
    /// reporting
    pub fn store_counts(&self) -> (usize, usize) {
        let books = self.repository.books.list();
        let open = self
            .repository
            .loans
            .list()
            .iter()
            .filter(|r| r.is_open())
            .count();
        (books.len(), open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::book::CreateBook;
    use crate::models::borrow::Borrower;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn stats_reflect_catalog_and_derived_loan_status() {
        let repository = Repository::new();
        crate::repository::seed::seed_demo_catalog(&repository).unwrap();

        let borrower = Borrower {
            id: 1,
            name: "John Doe".into(),
            email: "john@email.com".into(),
        };
        // one loan due at day 30, queried at day 45: overdue with a fine
        repository.loans.borrow(1, &borrower, day(0), 30).unwrap();
        let r2 = repository.loans.borrow(2, &borrower, day(40), 30).unwrap();
        let r3 = repository.loans.borrow(3, &borrower, day(0), 30).unwrap();
        repository.loans.return_book(r3.id, day(10), dec!(0.50)).unwrap();
        let _ = r2;

        let service = StatsService::new(
            repository,
            crate::config::LoanPolicy::default(),
            Arc::new(FixedClock(day(45))),
        );
        let stats = service.get_stats();

        assert_eq!(stats.catalog.total_books, 5);
        assert_eq!(stats.catalog.total_copies, 17);
        assert_eq!(stats.catalog.available_copies, 15);
        assert_eq!(stats.catalog.categories, 3);

        assert_eq!(stats.loans.active, 1);
        assert_eq!(stats.loans.overdue, 1);
        assert_eq!(stats.loans.returned, 1);
        assert_eq!(stats.loans.outstanding_fines, dec!(7.50));
    }
}
