//! Payment toggle service.
//!
//! Flips a member's `payment_completed` flag with low perceived latency
//! while the store stays authoritative. The operation is three-phased and
//! the snapshot/rollback is part of its contract, not incidental error
//! handling: snapshot the record cache, apply the new state speculatively,
//! then commit via upsert and reconcile — or restore the snapshot.

use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::session::RosterSession;
use crate::backend::storage::traits::MonthlyRecordStorage;
use shared::{MonthlyRecord, TogglePaymentResponse};

/// Service for the optimistic payment toggle
#[derive(Clone)]
pub struct PaymentService {
    records: Arc<dyn MonthlyRecordStorage>,
    session: Arc<Mutex<RosterSession>>,
}

impl PaymentService {
    pub fn new(records: Arc<dyn MonthlyRecordStorage>, session: Arc<Mutex<RosterSession>>) -> Self {
        Self { records, session }
    }

    /// Set a member's payment-completed flag for the selected month.
    ///
    /// A second toggle arriving while one is in flight for the same member
    /// is ignored (first request wins; no queuing). Re-issuing the same
    /// desired state after a completed write is a harmless no-op write
    /// thanks to the upsert keying.
    pub async fn toggle_payment(
        &self,
        promoter_id: &str,
        desired: bool,
    ) -> DomainResult<TogglePaymentResponse> {
        // Phase 1 under the session lock: guard, snapshot, optimistic apply.
        let (member, selection, snapshot) = {
            let mut session = self.session.lock().unwrap();

            let selection = session
                .selection
                .clone()
                .ok_or_else(|| DomainError::validation("Select a year and month first"))?;
            let member = session.merged_member(promoter_id).ok_or_else(|| {
                DomainError::validation(format!(
                    "Promoter not found in the loaded roster: {}",
                    promoter_id
                ))
            })?;

            if !session.begin_toggle(promoter_id) {
                warn!("Ignoring payment toggle for {}: already in flight", promoter_id);
                return Ok(TogglePaymentResponse {
                    record: None,
                    success_message: "Payment update already in progress".to_string(),
                });
            }

            let snapshot = session.snapshot_records();
            session.apply_optimistic_toggle(&member, desired, selection.year, selection.month);
            (member, selection, snapshot)
        };

        // Phase 2, lock released: the durable write. A real record id turns
        // the upsert into an explicit update; otherwise a fresh id is
        // offered and the unique constraint resolves any concurrent insert.
        let candidate_id = member
            .record_id
            .clone()
            .filter(|id| !MonthlyRecord::is_temp_id(id))
            .unwrap_or_else(MonthlyRecord::generate_id);

        let record = MonthlyRecord {
            id: candidate_id,
            promoter_id: member.id.clone(),
            group_id: member.group_id.clone(),
            year: selection.year,
            month: selection.month,
            days: member.days,
            payment_completed: desired,
        };

        let result = self.records.upsert_record(&record).await;

        // Phase 3: reconcile or roll back; the guard clears on both paths.
        let mut session = self.session.lock().unwrap();
        session.end_toggle(promoter_id);

        match result {
            Ok(stored) => {
                session.reconcile_record(stored.clone());
                info!(
                    "Payment for {} ({}/{}) set to {}",
                    promoter_id, selection.month, selection.year, desired
                );
                let success_message = if desired {
                    "Payment marked as completed"
                } else {
                    "Payment unmarked"
                };
                Ok(TogglePaymentResponse {
                    record: Some(stored),
                    success_message: success_message.to_string(),
                })
            }
            Err(e) => {
                session.restore_records(snapshot);
                error!("Payment toggle failed for {}: {}", promoter_id, e);
                Err(DomainError::Store(e))
            }
        }
    }
}
