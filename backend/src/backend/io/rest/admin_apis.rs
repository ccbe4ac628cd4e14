//! # REST API for Admin Verification

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::status_for;
use crate::backend::AppState;

/// Check whether a user id belongs to an admin
pub async fn verify_admin(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/admins/{}", user_id);

    match state.admin_service.verify_admin(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to verify admin: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}
