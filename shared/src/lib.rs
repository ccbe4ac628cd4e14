//! Shared data types for the promoter tracker.
//!
//! These types travel between the backend services and any client of the
//! REST interface. Durable entities are explicit structs with nullable
//! columns modeled as `Option`, never open-ended maps; calendar dates are
//! carried as `YYYY-MM-DD` strings and parsed in the domain layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection of promoters managed together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

/// A person enrolled for payment tracking within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promoter {
    pub id: String,
    /// Group this promoter belongs to
    pub group_id: String,
    pub name: String,
    /// Contact number; required at member creation
    pub phone: String,
    /// UPI payment address; required at member creation
    pub upi_id: Option<String>,
    /// First calendar date (YYYY-MM-DD) from which the promoter counts
    /// toward a month's roster. Absent means "always was active".
    pub join_date: Option<String>,
    /// First calendar date (YYYY-MM-DD) from which the promoter no longer
    /// counts. Set by soft delete; the row itself is never destroyed.
    pub leave_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// One promoter's attendance/payment state for exactly one calendar month.
///
/// At most one record exists per (promoter_id, year, month); the storage
/// layer enforces this with a unique constraint and upsert semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub id: String,
    pub promoter_id: String,
    pub group_id: String,
    pub year: i32,
    pub month: u32,
    /// Days worked in the month
    pub days: u32,
    pub payment_completed: bool,
}

/// Read view of a promoter merged with their record for the selected month.
///
/// Computed fresh on every roster load; never itself a source of truth.
/// `record_id` is `None` until a monthly record exists for the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedMember {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub phone: String,
    pub upi_id: Option<String>,
    pub join_date: Option<String>,
    pub leave_date: Option<String>,
    pub days: u32,
    pub payment_completed: bool,
    pub record_id: Option<String>,
}

/// Categorical/range filter over the merged roster view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DaysFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "paid")]
    Paid,
    #[serde(rename = "unpaid")]
    Unpaid,
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1-10")]
    OneToTen,
    #[serde(rename = "11-20")]
    ElevenToTwenty,
    #[serde(rename = "21-30")]
    TwentyOneToThirty,
    /// Exact match against a caller-supplied day count
    #[serde(rename = "custom")]
    Custom,
}

/// Request to add a member to a group for the currently selected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub name: Option<String>,
    pub phone: String,
    pub upi_id: String,
    /// Days worked in the join month; defaults to 0
    pub days: Option<u32>,
}

/// Request to update a member's details and their days for the selected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub phone: String,
    pub upi_id: String,
    /// When present, written to the selected month's record (created lazily
    /// if the member has no record for that month yet)
    pub days: Option<u32>,
}

/// Response after a member add/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberResponse {
    pub promoter: Promoter,
    pub success_message: String,
}

/// Response after a soft delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveMemberResponse {
    pub promoter_id: String,
    /// First day of the month the member no longer counts from
    pub leave_date: String,
    pub success_message: String,
}

/// Headline counts for a loaded roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub total: usize,
    pub paid: usize,
    pub unpaid: usize,
}

/// The derived roster view for one group and month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterResponse {
    pub members: Vec<MergedMember>,
    pub summary: RosterSummary,
}

/// Request to set a member's payment-completed flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TogglePaymentRequest {
    pub payment_completed: bool,
}

/// Response after a payment toggle.
///
/// `record` is the authoritative row returned by the store, or `None` when
/// the request was ignored because a toggle was already in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TogglePaymentResponse {
    pub record: Option<MonthlyRecord>,
    pub success_message: String,
}

/// Response listing all groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupListResponse {
    pub groups: Vec<Group>,
}

/// Result of the admins-table membership check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminVerifyResponse {
    pub user_id: String,
    pub is_admin: bool,
}

/// One row of the payment report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMember {
    pub name: String,
    pub phone: String,
    pub upi_id: Option<String>,
    pub days: u32,
}

/// Payment report data for one group and month, partitioned by payment
/// status. Rendering (PDF or otherwise) is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReport {
    pub group_name: String,
    pub year: i32,
    pub month: u32,
    /// Human-readable period label, e.g. "March 2025"
    pub period: String,
    /// RFC 3339 timestamp the report was assembled at
    pub generated_at: String,
    pub paid: Vec<ReportMember>,
    pub unpaid: Vec<ReportMember>,
}

impl Group {
    /// Generate a group ID
    pub fn generate_id() -> String {
        format!("group::{}", Uuid::new_v4())
    }
}

impl Promoter {
    /// Generate a promoter ID
    pub fn generate_id() -> String {
        format!("promoter::{}", Uuid::new_v4())
    }
}

impl MonthlyRecord {
    /// Generate a monthly record ID
    pub fn generate_id() -> String {
        format!("record::{}", Uuid::new_v4())
    }

    /// Sentinel ID for a record synthesized during an optimistic update,
    /// before the store has confirmed the write
    pub fn temp_id(promoter_id: &str) -> String {
        format!("temp-{}", promoter_id)
    }

    /// Whether an ID is an optimistic-update sentinel rather than a real
    /// store-assigned ID
    pub fn is_temp_id(id: &str) -> bool {
        id.starts_with("temp-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ids_are_prefixed_and_unique() {
        let a = Promoter::generate_id();
        let b = Promoter::generate_id();
        assert!(a.starts_with("promoter::"));
        assert_ne!(a, b);

        assert!(Group::generate_id().starts_with("group::"));
        assert!(MonthlyRecord::generate_id().starts_with("record::"));
    }

    #[test]
    fn test_temp_id_round_trip() {
        let temp = MonthlyRecord::temp_id("promoter::abc");
        assert_eq!(temp, "temp-promoter::abc");
        assert!(MonthlyRecord::is_temp_id(&temp));
        assert!(!MonthlyRecord::is_temp_id(&MonthlyRecord::generate_id()));
    }

    #[test]
    fn test_days_filter_serde_tags() {
        let cases = [
            (DaysFilter::All, "\"all\""),
            (DaysFilter::Paid, "\"paid\""),
            (DaysFilter::Unpaid, "\"unpaid\""),
            (DaysFilter::Zero, "\"0\""),
            (DaysFilter::OneToTen, "\"1-10\""),
            (DaysFilter::ElevenToTwenty, "\"11-20\""),
            (DaysFilter::TwentyOneToThirty, "\"21-30\""),
            (DaysFilter::Custom, "\"custom\""),
        ];
        for (filter, tag) in cases {
            assert_eq!(serde_json::to_string(&filter).unwrap(), tag);
            assert_eq!(serde_json::from_str::<DaysFilter>(tag).unwrap(), filter);
        }
    }

    #[test]
    fn test_days_filter_default_is_all() {
        assert_eq!(DaysFilter::default(), DaysFilter::All);
    }
}
