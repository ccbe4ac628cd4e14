//! # REST API for Payment Toggles

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::status_for;
use crate::backend::AppState;
use shared::TogglePaymentRequest;

/// Set a member's payment-completed flag for the selected month
pub async fn toggle_payment(
    State(state): State<AppState>,
    Path(promoter_id): Path<String>,
    Json(request): Json<TogglePaymentRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/members/{}/payment - completed: {}",
        promoter_id, request.payment_completed
    );

    match state
        .payment_service
        .toggle_payment(&promoter_id, request.payment_completed)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to toggle payment: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}
