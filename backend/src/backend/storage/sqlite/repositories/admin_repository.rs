use anyhow::Result;
use async_trait::async_trait;

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::AdminStorage;

/// Repository for the admins table
#[derive(Clone)]
pub struct AdminRepository {
    db: DbConnection,
}

impl AdminRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminStorage for AdminRepository {
    async fn is_admin(&self, user_id: &str) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT 1 FROM admins WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.is_some())
    }

    async fn store_admin(&self, user_id: &str, email: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, email, created_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(user_id)
        .bind(email)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}
