//! API handlers for Libris REST endpoints

pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod stats;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::{error::AppError, models::borrow::Borrower};

/// Caller role as asserted by the fronting auth layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Borrower,
    Librarian,
}

/// Caller identity taken from trusted request headers.
///
/// Authentication itself is an external collaborator (a fronting auth proxy
/// verifies credentials and stamps these headers); the core trusts the
/// identity as given and only gates librarian-only mutations on the role.
pub struct CallerIdentity {
    pub borrower: Borrower,
    pub role: Role,
}

impl CallerIdentity {
    pub fn require_librarian(&self) -> Result<(), AppError> {
        if self.role == Role::Librarian {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "librarian role required".to_string(),
            ))
        }
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|value| value.to_str().ok())
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let borrower_id: i64 = header(parts, "x-borrower-id")
            .ok_or_else(|| AppError::Authentication("Missing x-borrower-id header".to_string()))?
            .parse()
            .map_err(|_| AppError::Authentication("Invalid x-borrower-id header".to_string()))?;

        let role = match header(parts, "x-role") {
            Some("librarian") => Role::Librarian,
            _ => Role::Borrower,
        };

        Ok(CallerIdentity {
            borrower: Borrower {
                id: borrower_id,
                name: header(parts, "x-borrower-name").unwrap_or_default().to_string(),
                email: header(parts, "x-borrower-email").unwrap_or_default().to_string(),
            },
            role,
        })
    }
}
