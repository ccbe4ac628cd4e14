use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::PromoterStorage;
use shared::Promoter;

/// Repository for promoter operations
#[derive(Clone)]
pub struct PromoterRepository {
    db: DbConnection,
}

impl PromoterRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_promoter(row: &sqlx::sqlite::SqliteRow) -> Promoter {
        Promoter {
            id: row.get("id"),
            group_id: row.get("group_id"),
            name: row.get("name"),
            phone: row.get("phone"),
            upi_id: row.get("upi_id"),
            join_date: row.get("join_date"),
            leave_date: row.get("leave_date"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl PromoterStorage for PromoterRepository {
    async fn store_promoter(&self, promoter: &Promoter) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO promoters (id, group_id, name, phone, upi_id, join_date, leave_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&promoter.id)
        .bind(&promoter.group_id)
        .bind(&promoter.name)
        .bind(&promoter.phone)
        .bind(&promoter.upi_id)
        .bind(&promoter.join_date)
        .bind(&promoter.leave_date)
        .bind(&promoter.created_at)
        .bind(&promoter.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_promoter(&self, promoter_id: &str) -> Result<Option<Promoter>> {
        let row = sqlx::query(
            r#"
            SELECT id, group_id, name, phone, upi_id, join_date, leave_date, created_at, updated_at
            FROM promoters
            WHERE id = ?
            "#,
        )
        .bind(promoter_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_promoter))
    }

    async fn list_promoters(&self, group_id: &str) -> Result<Vec<Promoter>> {
        let rows = sqlx::query(
            r#"
            SELECT id, group_id, name, phone, upi_id, join_date, leave_date, created_at, updated_at
            FROM promoters
            WHERE group_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_promoter).collect())
    }

    async fn update_promoter(&self, promoter: &Promoter) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE promoters
            SET name = ?, phone = ?, upi_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&promoter.name)
        .bind(&promoter.phone)
        .bind(&promoter.upi_id)
        .bind(&promoter.updated_at)
        .bind(&promoter.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn set_leave_date(
        &self,
        promoter_id: &str,
        leave_date: &str,
        updated_at: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE promoters
            SET leave_date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(leave_date)
        .bind(updated_at)
        .bind(promoter_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}
