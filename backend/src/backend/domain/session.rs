//! Session-scoped roster state.
//!
//! One `RosterSession` holds everything an admin view session keeps in
//! memory: the current (group, year, month) selection, the cached promoter
//! and record collections for that selection, the load generation counter,
//! and the per-member in-flight toggle guard. The remote store stays the
//! single source of truth; these caches are replaced wholesale on every
//! successful load and are invalid for any other selection.
//!
//! Services share the session as `Arc<Mutex<RosterSession>>` and never hold
//! the lock across an await.

use shared::{MergedMember, MonthlyRecord, Promoter};
use std::collections::HashSet;

use super::roster::merge_roster;

/// The (group, year, month) a roster was loaded for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub group_id: String,
    pub year: i32,
    pub month: u32,
}

/// In-memory state for one admin view session
#[derive(Debug, Default)]
pub struct RosterSession {
    pub selection: Option<Selection>,
    pub promoters: Vec<Promoter>,
    pub records: Vec<MonthlyRecord>,
    /// False until a load completes, and false again while one is running;
    /// a failed load leaves it false so callers see an empty state rather
    /// than stale data.
    pub loaded: bool,
    newest_generation: u64,
    in_flight_toggles: HashSet<String>,
}

impl RosterSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load; returns the generation tag for this request. Issuing a
    /// new load supersedes every earlier one still in flight.
    pub fn begin_load(&mut self) -> u64 {
        self.newest_generation += 1;
        self.loaded = false;
        self.newest_generation
    }

    /// Install a completed load. Returns false, changing nothing, when a
    /// newer load has been issued since this one started — the stale
    /// result is discarded rather than allowed to overwrite the view.
    pub fn install(
        &mut self,
        generation: u64,
        selection: Selection,
        promoters: Vec<Promoter>,
        records: Vec<MonthlyRecord>,
    ) -> bool {
        if generation < self.newest_generation {
            return false;
        }
        self.selection = Some(selection);
        self.promoters = promoters;
        self.records = records;
        self.loaded = true;
        true
    }

    /// Reserve the toggle slot for a member. First request wins: returns
    /// false when a toggle is already in flight for this promoter.
    pub fn begin_toggle(&mut self, promoter_id: &str) -> bool {
        self.in_flight_toggles.insert(promoter_id.to_string())
    }

    /// Release the toggle slot; called on every outcome.
    pub fn end_toggle(&mut self, promoter_id: &str) {
        self.in_flight_toggles.remove(promoter_id);
    }

    /// Snapshot of the record cache, taken before an optimistic apply so a
    /// failed write can restore it exactly.
    pub fn snapshot_records(&self) -> Vec<MonthlyRecord> {
        self.records.clone()
    }

    pub fn restore_records(&mut self, snapshot: Vec<MonthlyRecord>) {
        self.records = snapshot;
    }

    /// Speculatively flip `payment_completed` for one member. When no
    /// record exists for the selection yet, a sentinel-id record is
    /// synthesized so the view can render the new state before the store
    /// confirms the write.
    pub fn apply_optimistic_toggle(
        &mut self,
        member: &MergedMember,
        desired: bool,
        year: i32,
        month: u32,
    ) {
        if let Some(record) = self.records.iter_mut().find(|r| r.promoter_id == member.id) {
            record.payment_completed = desired;
        } else {
            self.records.push(MonthlyRecord {
                id: MonthlyRecord::temp_id(&member.id),
                promoter_id: member.id.clone(),
                group_id: member.group_id.clone(),
                year,
                month,
                days: member.days,
                payment_completed: desired,
            });
        }
    }

    /// Replace whatever the cache holds for this promoter and month with
    /// the authoritative store row. This is how a sentinel id is retired.
    pub fn reconcile_record(&mut self, record: MonthlyRecord) {
        self.records.retain(|r| {
            !(r.promoter_id == record.promoter_id
                && r.year == record.year
                && r.month == record.month)
        });
        self.records.push(record);
    }

    /// The merged view of a single cached promoter, or `None` when the
    /// promoter is not part of the loaded roster.
    pub fn merged_member(&self, promoter_id: &str) -> Option<MergedMember> {
        let promoter = self.promoters.iter().find(|p| p.id == promoter_id)?;
        merge_roster(std::slice::from_ref(promoter), &self.records).pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> Selection {
        Selection {
            group_id: "group::g1".to_string(),
            year: 2025,
            month: 3,
        }
    }

    fn promoter(id: &str) -> Promoter {
        Promoter {
            id: id.to_string(),
            group_id: "group::g1".to_string(),
            name: id.to_string(),
            phone: "9876543210".to_string(),
            upi_id: None,
            join_date: Some("2025-01-01".to_string()),
            leave_date: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn record(promoter_id: &str, paid: bool) -> MonthlyRecord {
        MonthlyRecord {
            id: format!("record::{}", promoter_id),
            promoter_id: promoter_id.to_string(),
            group_id: "group::g1".to_string(),
            year: 2025,
            month: 3,
            days: 10,
            payment_completed: paid,
        }
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut session = RosterSession::new();

        let first = session.begin_load();
        let second = session.begin_load();

        // The newer request completes first and installs.
        assert!(session.install(second, selection(), vec![promoter("p2")], vec![]));
        assert!(session.loaded);

        // The older request completes late; its result must be dropped.
        assert!(!session.install(first, selection(), vec![promoter("p1")], vec![]));
        assert_eq!(session.promoters.len(), 1);
        assert_eq!(session.promoters[0].id, "p2");
        assert!(session.loaded);
    }

    #[test]
    fn test_begin_load_clears_loaded_flag() {
        let mut session = RosterSession::new();
        let generation = session.begin_load();
        session.install(generation, selection(), vec![], vec![]);
        assert!(session.loaded);

        session.begin_load();
        assert!(!session.loaded);
    }

    #[test]
    fn test_toggle_guard_first_request_wins() {
        let mut session = RosterSession::new();
        assert!(session.begin_toggle("p1"));
        assert!(!session.begin_toggle("p1"));
        // A different member is unaffected.
        assert!(session.begin_toggle("p2"));

        session.end_toggle("p1");
        assert!(session.begin_toggle("p1"));
    }

    #[test]
    fn test_optimistic_toggle_updates_existing_record() {
        let mut session = RosterSession::new();
        let generation = session.begin_load();
        session.install(
            generation,
            selection(),
            vec![promoter("p1")],
            vec![record("p1", false)],
        );

        let member = session.merged_member("p1").expect("member in roster");
        session.apply_optimistic_toggle(&member, true, 2025, 3);

        assert_eq!(session.records.len(), 1);
        assert!(session.records[0].payment_completed);
        assert_eq!(session.records[0].id, "record::p1");
    }

    #[test]
    fn test_optimistic_toggle_synthesizes_sentinel_record() {
        let mut session = RosterSession::new();
        let generation = session.begin_load();
        session.install(generation, selection(), vec![promoter("p1")], vec![]);

        let member = session.merged_member("p1").expect("member in roster");
        session.apply_optimistic_toggle(&member, true, 2025, 3);

        assert_eq!(session.records.len(), 1);
        assert!(MonthlyRecord::is_temp_id(&session.records[0].id));
        assert!(session.records[0].payment_completed);
    }

    #[test]
    fn test_rollback_restores_snapshot_exactly() {
        let mut session = RosterSession::new();
        let generation = session.begin_load();
        session.install(
            generation,
            selection(),
            vec![promoter("p1"), promoter("p2")],
            vec![record("p1", false), record("p2", true)],
        );

        let snapshot = session.snapshot_records();
        let member = session.merged_member("p1").expect("member in roster");
        session.apply_optimistic_toggle(&member, true, 2025, 3);
        assert_ne!(session.records, snapshot);

        session.restore_records(snapshot.clone());
        assert_eq!(session.records, snapshot);
    }

    #[test]
    fn test_reconcile_retires_sentinel_record() {
        let mut session = RosterSession::new();
        let generation = session.begin_load();
        session.install(generation, selection(), vec![promoter("p1")], vec![]);

        let member = session.merged_member("p1").expect("member in roster");
        session.apply_optimistic_toggle(&member, true, 2025, 3);

        let stored = record("p1", true);
        session.reconcile_record(stored.clone());

        assert_eq!(session.records.len(), 1);
        assert_eq!(session.records[0], stored);
        assert!(!MonthlyRecord::is_temp_id(&session.records[0].id));
    }
}
