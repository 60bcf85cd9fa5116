//! Loan (borrow record) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::borrow::{RecordDetails, RecordQuery},
};

use super::CallerIdentity;

/// Borrow request
#[derive(Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Book to borrow; the borrower is the caller
    pub book_id: i64,
}

/// Record list response
#[derive(Serialize, ToSchema)]
pub struct RecordListResponse {
    /// Records matching the query
    pub records: Vec<RecordDetails>,
    /// Number of matches
    pub total: usize,
}

/// List all borrow records (librarian view)
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    params(RecordQuery),
    responses(
        (status = 200, description = "Matching records", body = RecordListResponse),
        (status = 403, description = "Librarian role required")
    )
)]
pub async fn list_records(
    State(state): State<crate::AppState>,
    identity: CallerIdentity,
    Query(query): Query<RecordQuery>,
) -> AppResult<Json<RecordListResponse>> {
    identity.require_librarian()?;

    let records = state.services.loans.list_records(&query);
    let total = records.len();
    Ok(Json(RecordListResponse { records, total }))
}

/// List the caller's own borrow records
#[utoipa::path(
    get,
    path = "/loans/mine",
    tag = "loans",
    params(RecordQuery),
    responses(
        (status = 200, description = "The caller's records", body = RecordListResponse)
    )
)]
pub async fn my_records(
    State(state): State<crate::AppState>,
    identity: CallerIdentity,
    Query(query): Query<RecordQuery>,
) -> AppResult<Json<RecordListResponse>> {
    let records = state
        .services
        .loans
        .borrower_records(identity.borrower.id, &query);
    let total = records.len();
    Ok(Json(RecordListResponse { records, total }))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Copy borrowed", body = RecordDetails),
        (status = 404, description = "Book not found"),
        (status = 409, description = "No copies available or title already borrowed")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    identity: CallerIdentity,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<RecordDetails>)> {
    let record = state
        .services
        .loans
        .borrow(request.book_id, &identity.borrower)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Copy returned", body = RecordDetails),
        (status = 403, description = "Librarian role required"),
        (status = 404, description = "Record not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    identity: CallerIdentity,
    Path(record_id): Path<i64>,
) -> AppResult<Json<RecordDetails>> {
    identity.require_librarian()?;

    Ok(Json(state.services.loans.return_book(record_id)?))
}

/// Renew a loan
#[utoipa::path(
    post,
    path = "/loans/{id}/renew",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Loan renewed", body = RecordDetails),
        (status = 403, description = "Librarian role required"),
        (status = 404, description = "Record not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn renew_loan(
    State(state): State<crate::AppState>,
    identity: CallerIdentity,
    Path(record_id): Path<i64>,
) -> AppResult<Json<RecordDetails>> {
    identity.require_librarian()?;

    Ok(Json(state.services.loans.renew(record_id)?))
}
