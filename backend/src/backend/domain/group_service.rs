//! Group lookup service.
//!
//! Groups are created and edited outside the tracker; this service only
//! reads them.

use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::domain::errors::DomainResult;
use crate::backend::storage::traits::GroupStorage;
use shared::{Group, GroupListResponse};

#[derive(Clone)]
pub struct GroupService {
    groups: Arc<dyn GroupStorage>,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupStorage>) -> Self {
        Self { groups }
    }

    /// List all groups
    pub async fn list_groups(&self) -> DomainResult<GroupListResponse> {
        info!("Listing groups");

        let groups = self.groups.list_groups().await?;

        info!("Found {} group(s)", groups.len());

        Ok(GroupListResponse { groups })
    }

    /// Get a group by ID
    pub async fn get_group(&self, group_id: &str) -> DomainResult<Option<Group>> {
        info!("Getting group: {}", group_id);

        let group = self.groups.get_group(group_id).await?;

        if group.is_none() {
            warn!("Group not found: {}", group_id);
        }

        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::sqlite::{DbConnection, GroupRepository};

    async fn setup_test() -> (GroupService, Arc<dyn GroupStorage>) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let groups: Arc<dyn GroupStorage> = Arc::new(GroupRepository::new(db));
        (GroupService::new(groups.clone()), groups)
    }

    fn group(name: &str) -> Group {
        Group {
            id: Group::generate_id(),
            name: name.to_string(),
            description: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_groups_ordered_by_name() {
        let (service, groups) = setup_test().await;

        assert!(service.list_groups().await.expect("Failed to list").groups.is_empty());

        groups.store_group(&group("Zoo Crew")).await.expect("Failed to store group");
        groups.store_group(&group("Alpha Team")).await.expect("Failed to store group");

        let response = service.list_groups().await.expect("Failed to list");
        assert_eq!(response.groups.len(), 2);
        assert_eq!(response.groups[0].name, "Alpha Team");
        assert_eq!(response.groups[1].name, "Zoo Crew");
    }

    #[tokio::test]
    async fn test_get_group() {
        let (service, groups) = setup_test().await;

        let stored = group("Alpha Team");
        groups.store_group(&stored).await.expect("Failed to store group");

        let found = service.get_group(&stored.id).await.expect("Failed to get group");
        assert_eq!(found, Some(stored));

        let missing = service
            .get_group("group::missing")
            .await
            .expect("Failed to query group");
        assert!(missing.is_none());
    }
}
