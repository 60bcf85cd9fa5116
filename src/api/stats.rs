//! Statistics endpoints

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::CallerIdentity;

/// Statistics response
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    /// Catalog statistics
    pub catalog: CatalogStats,
    /// Loan statistics
    pub loans: LoanStats,
}

#[derive(Serialize, ToSchema)]
pub struct CatalogStats {
    /// Number of titles
    pub total_books: i64,
    /// Total copies across all titles
    pub total_copies: i64,
    /// Copies currently on the shelf
    pub available_copies: i64,
    /// Distinct categories
    pub categories: i64,
}

#[derive(Serialize, ToSchema)]
pub struct LoanStats {
    /// Open loans within their period
    pub active: i64,
    /// Open loans past their due date
    pub overdue: i64,
    /// Closed loans
    pub returned: i64,
    /// Fines accruing on the overdue loans
    pub outstanding_fines: Decimal,
}

/// Dashboard statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Catalog and loan totals", body = StatsResponse),
        (status = 403, description = "Librarian role required")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    identity: CallerIdentity,
) -> AppResult<Json<StatsResponse>> {
    identity.require_librarian()?;

    Ok(Json(state.services.stats.get_stats()))
}
