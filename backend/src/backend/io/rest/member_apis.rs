//! # REST API for Member Management
//!
//! Add, edit and soft-delete of group members. Deletion never removes
//! rows; it sets the member's leave date for the selected month.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::status_for;
use crate::backend::AppState;
use shared::{AddMemberRequest, UpdateMemberRequest};

/// Add a member to a group for the currently selected month
pub async fn add_member(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Json(request): Json<AddMemberRequest>,
) -> impl IntoResponse {
    info!("POST /api/groups/{}/members - request: {:?}", group_id, request);

    match state.member_service.add_member(&group_id, request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to add member: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}

/// Update a member's details and their days for the selected month
pub async fn update_member(
    State(state): State<AppState>,
    Path(promoter_id): Path<String>,
    Json(request): Json<UpdateMemberRequest>,
) -> impl IntoResponse {
    info!("PUT /api/members/{} - request: {:?}", promoter_id, request);

    match state.member_service.update_member(&promoter_id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update member: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}

/// Soft-delete a member as of the selected month
pub async fn remove_member(
    State(state): State<AppState>,
    Path(promoter_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/members/{}", promoter_id);

    match state.member_service.remove_member(&promoter_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to remove member: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}
