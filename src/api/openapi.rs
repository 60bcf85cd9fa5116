//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, loans, stats};
use crate::error::ErrorResponse;
use crate::models::book::{Availability, BookQuery, BookResponse, CreateBook, UpdateBook};
use crate::models::borrow::{
    BorrowStatus, Borrower, RecordDetails, RecordQuery, SortField, SortOrder, StatusFilter,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.9.0",
        description = "Library Catalog & Borrowing Ledger REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Loans
        loans::list_records,
        loans::my_records,
        loans::borrow_book,
        loans::return_book,
        loans::renew_loan,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            books::BookListResponse,
            loans::BorrowRequest,
            loans::RecordListResponse,
            stats::StatsResponse,
            stats::CatalogStats,
            stats::LoanStats,
            ErrorResponse,
            BookResponse,
            CreateBook,
            UpdateBook,
            BookQuery,
            Availability,
            Borrower,
            BorrowStatus,
            RecordDetails,
            RecordQuery,
            StatusFilter,
            SortField,
            SortOrder,
        )
    ),
    tags(
        (name = "books", description = "Catalog management"),
        (name = "loans", description = "Borrowing and returning"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Router serving the Swagger UI and the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
