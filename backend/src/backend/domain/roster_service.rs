//! Roster loading service.
//!
//! Composes the derivation pipeline: fetch promoters for the group, keep
//! the ones active in the selected month, fetch that month's records,
//! install the result into the session cache, then merge and filter.

use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::roster::{
    apply_days_filter, apply_search_filter, filter_active_promoters, merge_roster,
};
use crate::backend::domain::session::{RosterSession, Selection};
use crate::backend::storage::traits::{MonthlyRecordStorage, PromoterStorage};
use shared::{DaysFilter, RosterResponse, RosterSummary};

/// Service for loading and deriving the roster view
#[derive(Clone)]
pub struct RosterService {
    promoters: Arc<dyn PromoterStorage>,
    records: Arc<dyn MonthlyRecordStorage>,
    session: Arc<Mutex<RosterSession>>,
}

impl RosterService {
    pub fn new(
        promoters: Arc<dyn PromoterStorage>,
        records: Arc<dyn MonthlyRecordStorage>,
        session: Arc<Mutex<RosterSession>>,
    ) -> Self {
        Self {
            promoters,
            records,
            session,
        }
    }

    /// Load the roster for a group and month, then derive the filtered view.
    ///
    /// Each load carries a generation tag from the session; a load that
    /// finishes after a newer one has been issued is discarded, and the
    /// view derived here always reflects the newest installed load.
    pub async fn load_roster(
        &self,
        group_id: &str,
        year: i32,
        month: u32,
        search: &str,
        filter: DaysFilter,
        custom_days: Option<&str>,
    ) -> DomainResult<RosterResponse> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation("Month must be between 1 and 12"));
        }

        info!("Loading roster for group {} ({}/{})", group_id, month, year);

        let generation = self.session.lock().unwrap().begin_load();

        let all_promoters = self.promoters.list_promoters(group_id).await?;
        let active = filter_active_promoters(&all_promoters, year, month);

        let promoter_ids: Vec<String> = active.iter().map(|p| p.id.clone()).collect();
        let month_records = self
            .records
            .list_records_for_month(&promoter_ids, year, month)
            .await?;

        let (promoters, records) = {
            let mut session = self.session.lock().unwrap();
            let selection = Selection {
                group_id: group_id.to_string(),
                year,
                month,
            };
            if !session.install(generation, selection, active, month_records) {
                warn!(
                    "Discarding stale roster load for group {} ({}/{})",
                    group_id, month, year
                );
            }
            (session.promoters.clone(), session.records.clone())
        };

        let merged = merge_roster(&promoters, &records);
        let searched = apply_search_filter(merged, search);
        let members = apply_days_filter(searched, filter, custom_days);

        let paid = members.iter().filter(|m| m.payment_completed).count();
        let summary = RosterSummary {
            total: members.len(),
            paid,
            unpaid: members.len() - paid,
        };

        info!("Roster loaded: {} member(s) after filters", summary.total);

        Ok(RosterResponse { members, summary })
    }
}
