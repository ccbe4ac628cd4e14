//! # REST API Interface Layer
//!
//! HTTP endpoints for the promoter tracker. This layer handles request and
//! response serialization, translates domain errors to status codes, and
//! logs every request; business logic stays in the domain layer.

use axum::http::StatusCode;

use crate::backend::domain::DomainError;

pub mod admin_apis;
pub mod group_apis;
pub mod member_apis;
pub mod payment_apis;
pub mod report_apis;
pub mod roster_apis;

/// Map a domain error to the HTTP status it should surface as
pub(crate) fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation(message) if message.contains("not found") => {
            StatusCode::NOT_FOUND
        }
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
