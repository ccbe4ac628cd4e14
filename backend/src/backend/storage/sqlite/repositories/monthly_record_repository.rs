use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::MonthlyRecordStorage;
use shared::MonthlyRecord;

/// Repository for monthly record operations
#[derive(Clone)]
pub struct MonthlyRecordRepository {
    db: DbConnection,
}

impl MonthlyRecordRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> MonthlyRecord {
        MonthlyRecord {
            id: row.get("id"),
            promoter_id: row.get("promoter_id"),
            group_id: row.get("group_id"),
            year: row.get("year"),
            month: row.get("month"),
            days: row.get("days"),
            payment_completed: row.get("payment_completed"),
        }
    }

    async fn get_record_for_month(
        &self,
        promoter_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Option<MonthlyRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, promoter_id, group_id, year, month, days, payment_completed
            FROM monthly_records
            WHERE promoter_id = ? AND year = ? AND month = ?
            "#,
        )
        .bind(promoter_id)
        .bind(year)
        .bind(month)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_record))
    }
}

#[async_trait]
impl MonthlyRecordStorage for MonthlyRecordRepository {
    async fn store_record(&self, record: &MonthlyRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO monthly_records (id, promoter_id, group_id, year, month, days, payment_completed)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.promoter_id)
        .bind(&record.group_id)
        .bind(record.year)
        .bind(record.month)
        .bind(record.days)
        .bind(record.payment_completed)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_record(&self, record_id: &str) -> Result<Option<MonthlyRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, promoter_id, group_id, year, month, days, payment_completed
            FROM monthly_records
            WHERE id = ?
            "#,
        )
        .bind(record_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_record))
    }

    async fn list_records_for_month(
        &self,
        promoter_ids: &[String],
        year: i32,
        month: u32,
    ) -> Result<Vec<MonthlyRecord>> {
        if promoter_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; promoter_ids.len()].join(", ");
        let sql = format!(
            r#"
            SELECT id, promoter_id, group_id, year, month, days, payment_completed
            FROM monthly_records
            WHERE year = ? AND month = ? AND promoter_id IN ({})
            "#,
            placeholders
        );

        let mut query = sqlx::query(&sql).bind(year).bind(month);
        for promoter_id in promoter_ids {
            query = query.bind(promoter_id);
        }

        let rows = query.fetch_all(self.db.pool()).await?;
        Ok(rows.iter().map(Self::row_to_record).collect())
    }

    async fn update_days(&self, record_id: &str, days: u32) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE monthly_records
            SET days = ?
            WHERE id = ?
            "#,
        )
        .bind(days)
        .bind(record_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn upsert_record(&self, record: &MonthlyRecord) -> Result<MonthlyRecord> {
        // A known ID is written as an explicit update so the (promoter_id,
        // year, month) lookup can never race into a duplicate insert.
        let exists = self.get_record(&record.id).await?.is_some();

        if exists {
            sqlx::query(
                r#"
                UPDATE monthly_records
                SET days = ?, payment_completed = ?
                WHERE id = ?
                "#,
            )
            .bind(record.days)
            .bind(record.payment_completed)
            .bind(&record.id)
            .execute(self.db.pool())
            .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO monthly_records (id, promoter_id, group_id, year, month, days, payment_completed)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(promoter_id, year, month)
                DO UPDATE SET days = excluded.days, payment_completed = excluded.payment_completed
                "#,
            )
            .bind(&record.id)
            .bind(&record.promoter_id)
            .bind(&record.group_id)
            .bind(record.year)
            .bind(record.month)
            .bind(record.days)
            .bind(record.payment_completed)
            .execute(self.db.pool())
            .await?;
        }

        // Re-read by the uniqueness key: on a conflict update the stored row
        // keeps its original ID, which is the one the caller must adopt.
        self.get_record_for_month(&record.promoter_id, record.year, record.month)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Monthly record missing after upsert"))
    }
}
