//! # Storage Traits
//!
//! Abstraction over the record store so the domain layer can work with any
//! backend. The production implementation is SQLite; tests substitute
//! in-memory doubles where they need to force failures.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Group, MonthlyRecord, Promoter};

/// Interface for group storage operations
#[async_trait]
pub trait GroupStorage: Send + Sync {
    /// Store a group. Groups are created outside the tracker; this exists
    /// for tests and seeding.
    async fn store_group(&self, group: &Group) -> Result<()>;

    /// Retrieve a group by ID
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>>;

    /// List all groups ordered by name
    async fn list_groups(&self) -> Result<Vec<Group>>;
}

/// Interface for promoter storage operations
#[async_trait]
pub trait PromoterStorage: Send + Sync {
    /// Store a new promoter
    async fn store_promoter(&self, promoter: &Promoter) -> Result<()>;

    /// Retrieve a promoter by ID
    async fn get_promoter(&self, promoter_id: &str) -> Result<Option<Promoter>>;

    /// All promoters for a group, departed members included, in creation
    /// order. Month-level activity is decided by the roster derivation,
    /// never by the query.
    async fn list_promoters(&self, group_id: &str) -> Result<Vec<Promoter>>;

    /// Update an existing promoter's details
    async fn update_promoter(&self, promoter: &Promoter) -> Result<()>;

    /// Set the soft-delete marker: the first date the promoter no longer
    /// counts toward a roster
    async fn set_leave_date(
        &self,
        promoter_id: &str,
        leave_date: &str,
        updated_at: &str,
    ) -> Result<()>;
}

/// Interface for monthly record storage operations
#[async_trait]
pub trait MonthlyRecordStorage: Send + Sync {
    /// Store a new monthly record
    async fn store_record(&self, record: &MonthlyRecord) -> Result<()>;

    /// Retrieve a record by ID
    async fn get_record(&self, record_id: &str) -> Result<Option<MonthlyRecord>>;

    /// Records for one month limited to the given promoters
    async fn list_records_for_month(
        &self,
        promoter_ids: &[String],
        year: i32,
        month: u32,
    ) -> Result<Vec<MonthlyRecord>>;

    /// Update the day count of an existing record
    async fn update_days(&self, record_id: &str, days: u32) -> Result<()>;

    /// Insert-or-update keyed on the (promoter_id, year, month) uniqueness
    /// constraint. When the given ID names an existing row the write is an
    /// explicit update, never a blind insert. Returns the authoritative
    /// row as stored.
    async fn upsert_record(&self, record: &MonthlyRecord) -> Result<MonthlyRecord>;
}

/// Interface for the admins-table membership check
#[async_trait]
pub trait AdminStorage: Send + Sync {
    /// Whether the user ID appears in the admins table
    async fn is_admin(&self, user_id: &str) -> Result<bool>;

    /// Register an admin. Tests and seeding only.
    async fn store_admin(&self, user_id: &str, email: &str) -> Result<()>;
}
