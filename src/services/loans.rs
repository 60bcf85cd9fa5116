//! Loan management service

use std::sync::Arc;

use crate::{
    clock::Clock,
    config::LoanPolicy,
    error::AppResult,
    models::borrow::{Borrower, RecordDetails, RecordQuery},
    query,
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    policy: LoanPolicy,
    clock: Arc<dyn Clock>,
}

impl LoansService {
    pub fn new(repository: Repository, policy: LoanPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            policy,
            clock,
        }
    }

    /// Borrow a book for the given borrower
    pub fn borrow(&self, book_id: i64, borrower: &Borrower) -> AppResult<RecordDetails> {
        let now = self.clock.now();
        let record =
            self.repository
                .loans
                .borrow(book_id, borrower, now, self.policy.loan_period_days)?;
        Ok(RecordDetails::derive(&record, now, self.policy.daily_fine_rate))
    }

    /// Return a borrowed book
    pub fn return_book(&self, record_id: i64) -> AppResult<RecordDetails> {
        let now = self.clock.now();
        let record = self
            .repository
            .loans
            .return_book(record_id, now, self.policy.daily_fine_rate)?;
        Ok(RecordDetails::derive(&record, now, self.policy.daily_fine_rate))
    }

    /// Renew a loan
    pub fn renew(&self, record_id: i64) -> AppResult<RecordDetails> {
        let now = self.clock.now();
        let record =
            self.repository
                .loans
                .renew(record_id, now, self.policy.renew_extension_days)?;
        Ok(RecordDetails::derive(&record, now, self.policy.daily_fine_rate))
    }

    /// All borrow records, filtered and sorted (librarian view)
    pub fn list_records(&self, query: &RecordQuery) -> Vec<RecordDetails> {
        let now = self.clock.now();
        query::apply_record_query(self.repository.loans.list(), query, now)
            .iter()
            .map(|r| RecordDetails::derive(r, now, self.policy.daily_fine_rate))
            .collect()
    }

    /// One borrower's records, filtered and sorted (profile view)
    pub fn borrower_records(&self, borrower_id: i64, query: &RecordQuery) -> Vec<RecordDetails> {
        let now = self.clock.now();
        query::apply_record_query(self.repository.loans.for_borrower(borrower_id), query, now)
            .iter()
            .map(|r| RecordDetails::derive(r, now, self.policy.daily_fine_rate))
            .collect()
    }
}
