//! Member lifecycle service: add, edit, soft delete.
//!
//! Every mutation is followed by a full roster reload for the current
//! selection so the session view is re-derived from the store rather than
//! patched incrementally.

use std::sync::{Arc, Mutex};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::roster_service::RosterService;
use crate::backend::domain::session::{RosterSession, Selection};
use crate::backend::storage::traits::{MonthlyRecordStorage, PromoterStorage};
use shared::{
    AddMemberRequest, DaysFilter, MemberResponse, MonthlyRecord, Promoter, RemoveMemberResponse,
    UpdateMemberRequest,
};

/// Service for managing group members
#[derive(Clone)]
pub struct MemberService {
    promoters: Arc<dyn PromoterStorage>,
    records: Arc<dyn MonthlyRecordStorage>,
    session: Arc<Mutex<RosterSession>>,
    roster_service: RosterService,
}

fn now_rfc3339() -> anyhow::Result<String> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

/// First calendar day of a month as a YYYY-MM-DD string
fn first_day_of_month(year: i32, month: u32) -> String {
    format!("{:04}-{:02}-01", year, month)
}

impl MemberService {
    pub fn new(
        promoters: Arc<dyn PromoterStorage>,
        records: Arc<dyn MonthlyRecordStorage>,
        session: Arc<Mutex<RosterSession>>,
        roster_service: RosterService,
    ) -> Self {
        Self {
            promoters,
            records,
            session,
            roster_service,
        }
    }

    /// Add a member to the group for the currently selected month.
    ///
    /// The join date is the first day of the selected month, so the member
    /// appears on this month's roster and no earlier one.
    pub async fn add_member(
        &self,
        group_id: &str,
        request: AddMemberRequest,
    ) -> DomainResult<MemberResponse> {
        let phone = request.phone.trim();
        if phone.is_empty() {
            return Err(DomainError::validation("Phone number is required"));
        }
        let upi_id = request.upi_id.trim();
        if upi_id.is_empty() {
            return Err(DomainError::validation("UPI ID is required"));
        }

        let selection = self.current_selection()?;
        if selection.group_id != group_id {
            return Err(DomainError::validation(
                "Load the roster for this group before adding members",
            ));
        }

        info!(
            "Adding member to group {} for {}/{}",
            group_id, selection.month, selection.year
        );

        let now = now_rfc3339()?;
        let promoter = Promoter {
            id: Promoter::generate_id(),
            group_id: group_id.to_string(),
            name: request.name.as_deref().unwrap_or("").trim().to_string(),
            phone: phone.to_string(),
            upi_id: Some(upi_id.to_string()),
            join_date: Some(first_day_of_month(selection.year, selection.month)),
            leave_date: None,
            created_at: now.clone(),
            updated_at: now,
        };
        self.promoters.store_promoter(&promoter).await?;

        // The initial record is a second, independent write. If it fails,
        // the promoter stays behind with no record and renders as
        // days=0/unpaid on the next load; there is no compensating
        // rollback. See DESIGN.md.
        let record = MonthlyRecord {
            id: MonthlyRecord::generate_id(),
            promoter_id: promoter.id.clone(),
            group_id: group_id.to_string(),
            year: selection.year,
            month: selection.month,
            days: request.days.unwrap_or(0),
            payment_completed: false,
        };
        self.records.store_record(&record).await?;

        self.reload_roster().await?;

        info!("Added member {} to group {}", promoter.id, group_id);

        Ok(MemberResponse {
            promoter,
            success_message: "Member added successfully".to_string(),
        })
    }

    /// Update a member's details, and their day count for the selected
    /// month when one is supplied.
    pub async fn update_member(
        &self,
        promoter_id: &str,
        request: UpdateMemberRequest,
    ) -> DomainResult<MemberResponse> {
        let phone = request.phone.trim();
        if phone.is_empty() {
            return Err(DomainError::validation("Phone number is required"));
        }
        let upi_id = request.upi_id.trim();
        if upi_id.is_empty() {
            return Err(DomainError::validation("UPI ID is required"));
        }

        let mut promoter = self
            .promoters
            .get_promoter(promoter_id)
            .await?
            .ok_or_else(|| {
                DomainError::validation(format!("Promoter not found: {}", promoter_id))
            })?;

        promoter.name = request.name.as_deref().unwrap_or("").trim().to_string();
        promoter.phone = phone.to_string();
        promoter.upi_id = Some(upi_id.to_string());
        promoter.updated_at = now_rfc3339()?;
        self.promoters.update_promoter(&promoter).await?;

        if let Some(days) = request.days {
            self.write_days(&promoter, days).await?;
        }

        self.reload_roster().await?;

        info!("Updated member {}", promoter_id);

        Ok(MemberResponse {
            promoter,
            success_message: "Member updated successfully".to_string(),
        })
    }

    /// Soft-delete a member: set their leave date to the first day of the
    /// selected month. History for earlier months stays untouched — no
    /// monthly record is ever deleted here.
    pub async fn remove_member(&self, promoter_id: &str) -> DomainResult<RemoveMemberResponse> {
        let selection = self.current_selection()?;

        let promoter = self
            .promoters
            .get_promoter(promoter_id)
            .await?
            .ok_or_else(|| {
                DomainError::validation(format!("Promoter not found: {}", promoter_id))
            })?;

        let leave_date = first_day_of_month(selection.year, selection.month);
        let now = now_rfc3339()?;
        self.promoters
            .set_leave_date(&promoter.id, &leave_date, &now)
            .await?;

        info!("Soft-deleted promoter {} as of {}", promoter_id, leave_date);

        self.reload_roster().await?;

        Ok(RemoveMemberResponse {
            promoter_id: promoter.id,
            leave_date,
            success_message: "Member removed from this month onwards".to_string(),
        })
    }

    /// Write the day count for the selected month: an update when the
    /// session already knows a real record, a lazy insert otherwise.
    async fn write_days(&self, promoter: &Promoter, days: u32) -> DomainResult<()> {
        let selection = self.current_selection()?;

        let record_id = {
            let session = self.session.lock().unwrap();
            session
                .records
                .iter()
                .find(|r| r.promoter_id == promoter.id)
                .filter(|r| !MonthlyRecord::is_temp_id(&r.id))
                .map(|r| r.id.clone())
        };

        match record_id {
            Some(id) => self.records.update_days(&id, days).await?,
            None => {
                let record = MonthlyRecord {
                    id: MonthlyRecord::generate_id(),
                    promoter_id: promoter.id.clone(),
                    group_id: promoter.group_id.clone(),
                    year: selection.year,
                    month: selection.month,
                    days,
                    payment_completed: false,
                };
                self.records.store_record(&record).await?;
            }
        }
        Ok(())
    }

    fn current_selection(&self) -> DomainResult<Selection> {
        self.session
            .lock()
            .unwrap()
            .selection
            .clone()
            .ok_or_else(|| DomainError::validation("Select a year and month first"))
    }

    async fn reload_roster(&self) -> DomainResult<()> {
        let selection = self.current_selection()?;
        self.roster_service
            .load_roster(
                &selection.group_id,
                selection.year,
                selection.month,
                "",
                DaysFilter::All,
                None,
            )
            .await?;
        Ok(())
    }
}
