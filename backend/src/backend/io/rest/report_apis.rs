//! # REST API for Payment Reports

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use super::status_for;
use crate::backend::AppState;

/// Query parameters for the report endpoint
#[derive(Deserialize, Debug)]
pub struct ReportQuery {
    pub year: i32,
    pub month: u32,
}

/// Assemble the payment report data for a group and month
pub async fn payment_report(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    info!("GET /api/groups/{}/report - query: {:?}", group_id, query);

    match state
        .report_service
        .payment_report(&group_id, query.year, query.month)
        .await
    {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!("Failed to assemble report: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}
