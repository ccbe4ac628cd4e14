//! # REST API for Roster Loading

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use super::status_for;
use crate::backend::AppState;
use shared::DaysFilter;

/// Query parameters for the roster endpoint
#[derive(Deserialize, Debug)]
pub struct RosterQuery {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub days_filter: DaysFilter,
    pub custom_days: Option<String>,
}

/// Load the roster for a group and month and return the filtered view
pub async fn load_roster(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Query(query): Query<RosterQuery>,
) -> impl IntoResponse {
    info!("GET /api/groups/{}/roster - query: {:?}", group_id, query);

    match state
        .roster_service
        .load_roster(
            &group_id,
            query.year,
            query.month,
            &query.search,
            query.days_filter,
            query.custom_days.as_deref(),
        )
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to load roster: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::initialize_backend;

    #[tokio::test]
    async fn test_load_roster_handler_rejects_invalid_month() {
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
        let state = initialize_backend(&db_url)
            .await
            .expect("Failed to initialize backend");

        let query = RosterQuery {
            year: 2025,
            month: 13,
            search: String::new(),
            days_filter: DaysFilter::All,
            custom_days: None,
        };
        let response = load_roster(State(state), Path("group::g1".to_string()), Query(query))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
