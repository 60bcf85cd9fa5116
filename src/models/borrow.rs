//! Borrow record (ledger entry) model and derived status/fine rules

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Normalize a money amount to exactly two decimal places, so a zero fine
/// serializes as "0.00" rather than "0".
pub fn money(amount: Decimal) -> Decimal {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    amount
}

/// Lifecycle status of a borrow record.
///
/// Never stored; always derived from `returned_date`, `due_date` and the
/// query time. `Returned` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BorrowStatus {
    Active,
    Overdue,
    Returned,
}

/// Borrower identity as supplied by the caller (the auth collaborator owns
/// verification; the core trusts what it is given).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Borrower {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Ledger entry for one borrowed copy.
///
/// Book title/author/ISBN and the borrower identity are denormalized at
/// borrow time so record search does not need a catalog join; the copy
/// accounting itself always goes through `book_id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowRecord {
    pub id: i64,
    pub book_id: i64,
    pub book_title: String,
    pub book_author: String,
    pub isbn: String,
    pub borrower_id: i64,
    pub borrower_name: String,
    pub borrower_email: String,
    pub borrowed_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
    /// Fine as finalized by return or reset by renew. While the record is
    /// open this stays 0; the accruing amount is derived via [`Self::fine_at`].
    pub fine_amount: Decimal,
}

impl BorrowRecord {
    /// A record is open until it is returned
    pub fn is_open(&self) -> bool {
        self.returned_date.is_none()
    }

    /// Derive the status at the given time
    pub fn status_at(&self, now: DateTime<Utc>) -> BorrowStatus {
        if self.returned_date.is_some() {
            BorrowStatus::Returned
        } else if now > self.due_date {
            BorrowStatus::Overdue
        } else {
            BorrowStatus::Active
        }
    }

    /// Whole days late at the given time; zero while within the loan period.
    /// For returned records the returned date is the reference, not `now`.
    pub fn days_late(&self, now: DateTime<Utc>) -> i64 {
        let reference = self.returned_date.unwrap_or(now);
        (reference - self.due_date).num_days().max(0)
    }

    /// Derive the fine at the given time: accrued while overdue and unreturned,
    /// fixed at return time if returned late.
    pub fn fine_at(&self, now: DateTime<Utc>, daily_rate: Decimal) -> Decimal {
        if self.returned_date.is_some() {
            self.fine_amount
        } else {
            money(Decimal::from(self.days_late(now)) * daily_rate)
        }
    }
}

/// Record with derived status and fine, for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordDetails {
    pub id: i64,
    pub book_id: i64,
    pub book_title: String,
    pub book_author: String,
    pub isbn: String,
    pub borrower_id: i64,
    pub borrower_name: String,
    pub borrower_email: String,
    pub borrowed_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
    pub status: BorrowStatus,
    pub fine_amount: Decimal,
}

impl RecordDetails {
    pub fn derive(record: &BorrowRecord, now: DateTime<Utc>, daily_rate: Decimal) -> Self {
        Self {
            id: record.id,
            book_id: record.book_id,
            book_title: record.book_title.clone(),
            book_author: record.book_author.clone(),
            isbn: record.isbn.clone(),
            borrower_id: record.borrower_id,
            borrower_name: record.borrower_name.clone(),
            borrower_email: record.borrower_email.clone(),
            borrowed_date: record.borrowed_date,
            due_date: record.due_date,
            returned_date: record.returned_date,
            status: record.status_at(now),
            fine_amount: record.fine_at(now, daily_rate),
        }
    }
}

/// Status filter for record queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Overdue,
    Returned,
}

impl StatusFilter {
    pub fn matches(self, status: BorrowStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == BorrowStatus::Active,
            StatusFilter::Overdue => status == BorrowStatus::Overdue,
            StatusFilter::Returned => status == BorrowStatus::Returned,
        }
    }
}

/// Sortable record fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    BorrowedDate,
    DueDate,
    ReturnedDate,
    BookTitle,
    BorrowerName,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Record query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RecordQuery {
    #[serde(default)]
    pub status: StatusFilter,
    /// Case-insensitive substring match on book title/author, borrower
    /// name/email and ISBN
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
    }

    fn record() -> BorrowRecord {
        BorrowRecord {
            id: 1,
            book_id: 1,
            book_title: "The Great Gatsby".into(),
            book_author: "F. Scott Fitzgerald".into(),
            isbn: "978-0-7432-7356-5".into(),
            borrower_id: 7,
            borrower_name: "John Doe".into(),
            borrower_email: "john.doe@email.com".into(),
            borrowed_date: day(0),
            due_date: day(30),
            returned_date: None,
            fine_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn status_is_active_within_loan_period() {
        let r = record();
        assert_eq!(r.status_at(day(0)), BorrowStatus::Active);
        assert_eq!(r.status_at(day(30)), BorrowStatus::Active);
    }

    #[test]
    fn status_flips_to_overdue_past_due_date() {
        let r = record();
        assert_eq!(r.status_at(day(31)), BorrowStatus::Overdue);
    }

    #[test]
    fn returned_is_terminal_even_when_late() {
        let mut r = record();
        r.returned_date = Some(day(40));
        assert_eq!(r.status_at(day(45)), BorrowStatus::Returned);
    }

    #[test]
    fn fine_accrues_per_whole_day_while_open() {
        let r = record();
        assert_eq!(r.fine_at(day(30), dec!(0.50)), Decimal::ZERO);
        // 15 whole days past the due date
        assert_eq!(r.fine_at(day(45), dec!(0.50)), dec!(7.50));
    }

    #[test]
    fn fines_render_with_two_decimal_places() {
        let r = record();
        assert_eq!(r.fine_at(day(30), dec!(0.50)).to_string(), "0.00");
        assert_eq!(r.fine_at(day(45), dec!(0.50)).to_string(), "7.50");
    }

    #[test]
    fn fine_is_fixed_at_return_time() {
        let mut r = record();
        r.returned_date = Some(day(32));
        r.fine_amount = dec!(1.00);
        // later queries no longer accrue
        assert_eq!(r.fine_at(day(60), dec!(0.50)), dec!(1.00));
    }

    #[test]
    fn partial_days_do_not_count() {
        let r = record();
        // 23 hours past due is still day zero
        let now = day(30) + Duration::hours(23);
        assert_eq!(r.days_late(now), 0);
        assert_eq!(r.status_at(now), BorrowStatus::Overdue);
    }
}
