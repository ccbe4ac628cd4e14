//! Admin verification.
//!
//! The tracker's only authorization rule: a user is an admin iff their id
//! appears in the admins table. Session handling and the authentication
//! protocol itself live with the external auth collaborator.

use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::storage::traits::AdminStorage;
use shared::AdminVerifyResponse;

#[derive(Clone)]
pub struct AdminService {
    admins: Arc<dyn AdminStorage>,
}

impl AdminService {
    pub fn new(admins: Arc<dyn AdminStorage>) -> Self {
        Self { admins }
    }

    /// Check whether a user id belongs to an admin
    pub async fn verify_admin(&self, user_id: &str) -> DomainResult<AdminVerifyResponse> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(DomainError::validation("User ID is required"));
        }

        let is_admin = self.admins.is_admin(user_id).await?;

        if is_admin {
            info!("Verified admin: {}", user_id);
        } else {
            warn!("Admin check failed for user: {}", user_id);
        }

        Ok(AdminVerifyResponse {
            user_id: user_id.to_string(),
            is_admin,
        })
    }
}
