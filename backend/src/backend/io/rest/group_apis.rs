//! # REST API for Groups
//!
//! Read-only endpoints; groups are created outside the tracker.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::status_for;
use crate::backend::AppState;

/// List all groups
pub async fn list_groups(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/groups");

    match state.group_service.list_groups().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list groups: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}

/// Get a group by ID
pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/groups/{}", group_id);

    match state.group_service.get_group(&group_id).await {
        Ok(Some(group)) => (StatusCode::OK, Json(group)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Group not found").into_response(),
        Err(e) => {
            error!("Failed to get group: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::initialize_backend;

    async fn setup_test_state() -> AppState {
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
        initialize_backend(&db_url)
            .await
            .expect("Failed to initialize backend")
    }

    #[tokio::test]
    async fn test_list_groups_handler_returns_ok() {
        let state = setup_test_state().await;

        let response = list_groups(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let parsed: shared::GroupListResponse =
            serde_json::from_slice(&body).expect("Failed to parse body");
        assert!(parsed.groups.is_empty());
    }

    #[tokio::test]
    async fn test_get_group_handler_returns_not_found() {
        let state = setup_test_state().await;

        let response = get_group(State(state), Path("group::missing".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
