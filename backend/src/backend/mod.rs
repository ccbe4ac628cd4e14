//! # Backend Module
//!
//! Brings together the three layers of the promoter tracker:
//! - **Domain**: roster derivation and the mutation services
//! - **Storage**: the SQLite record store behind trait interfaces
//! - **IO**: the REST layer exposed to the UI
//!
//! The backend is UI-agnostic: any client that speaks the REST interface
//! (the web dashboard, a CLI, tests) gets the same behavior.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::{Arc, Mutex};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::backend::domain::{
    AdminService, GroupService, MemberService, PaymentService, ReportService, RosterService,
    RosterSession,
};
use crate::backend::storage::sqlite::{
    AdminRepository, DbConnection, GroupRepository, MonthlyRecordRepository, PromoterRepository,
};
use crate::backend::storage::traits::{
    AdminStorage, GroupStorage, MonthlyRecordStorage, PromoterStorage,
};

pub use domain::*;
pub use io::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub group_service: GroupService,
    pub roster_service: RosterService,
    pub payment_service: PaymentService,
    pub member_service: MemberService,
    pub admin_service: AdminService,
    pub report_service: ReportService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(db_url: &str) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(db_url).await?;

    info!("Setting up domain services");
    let group_repo: Arc<dyn GroupStorage> = Arc::new(GroupRepository::new(db.clone()));
    let promoter_repo: Arc<dyn PromoterStorage> = Arc::new(PromoterRepository::new(db.clone()));
    let record_repo: Arc<dyn MonthlyRecordStorage> =
        Arc::new(MonthlyRecordRepository::new(db.clone()));
    let admin_repo: Arc<dyn AdminStorage> = Arc::new(AdminRepository::new(db));

    let session = Arc::new(Mutex::new(RosterSession::new()));

    let roster_service = RosterService::new(promoter_repo.clone(), record_repo.clone(), session.clone());
    let payment_service = PaymentService::new(record_repo.clone(), session.clone());
    let member_service = MemberService::new(
        promoter_repo,
        record_repo,
        session,
        roster_service.clone(),
    );
    let group_service = GroupService::new(group_repo.clone());
    let admin_service = AdminService::new(admin_repo);
    let report_service = ReportService::new(group_repo, roster_service.clone());

    info!("Setting up application state");
    Ok(AppState {
        group_service,
        roster_service,
        payment_service,
        member_service,
        admin_service,
        report_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the dashboard to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/groups", get(io::rest::group_apis::list_groups))
        .route("/groups/:group_id", get(io::rest::group_apis::get_group))
        .route(
            "/groups/:group_id/roster",
            get(io::rest::roster_apis::load_roster),
        )
        .route(
            "/groups/:group_id/members",
            post(io::rest::member_apis::add_member),
        )
        .route(
            "/groups/:group_id/report",
            get(io::rest::report_apis::payment_report),
        )
        .route(
            "/members/:promoter_id",
            put(io::rest::member_apis::update_member)
                .delete(io::rest::member_apis::remove_member),
        )
        .route(
            "/members/:promoter_id/payment",
            post(io::rest::payment_apis::toggle_payment),
        )
        .route("/admins/:user_id", get(io::rest::admin_apis::verify_admin));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
