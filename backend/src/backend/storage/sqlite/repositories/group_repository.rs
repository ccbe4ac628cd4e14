use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::GroupStorage;
use shared::Group;

/// Repository for group operations
#[derive(Clone)]
pub struct GroupRepository {
    db: DbConnection,
}

impl GroupRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_group(row: &sqlx::sqlite::SqliteRow) -> Group {
        Group {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl GroupStorage for GroupRepository {
    async fn store_group(&self, group: &Group) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO groups (id, name, description, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&group.id)
        .bind(&group.name)
        .bind(&group.description)
        .bind(&group.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, created_at
            FROM groups
            WHERE id = ?
            "#,
        )
        .bind(group_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_group))
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, created_at
            FROM groups
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_group).collect())
    }
}
