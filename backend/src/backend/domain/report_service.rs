//! Payment report assembly.
//!
//! Builds the report data for one group and month: members partitioned by
//! payment status plus a period label and a generation timestamp. How the
//! data is rendered (PDF or otherwise) is the caller's concern.

use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::roster_service::RosterService;
use crate::backend::storage::traits::GroupStorage;
use shared::{DaysFilter, PaymentReport, ReportMember};

#[derive(Clone)]
pub struct ReportService {
    groups: Arc<dyn GroupStorage>,
    roster_service: RosterService,
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Invalid Month",
    }
}

impl ReportService {
    pub fn new(groups: Arc<dyn GroupStorage>, roster_service: RosterService) -> Self {
        Self {
            groups,
            roster_service,
        }
    }

    /// Assemble the payment report for a group and month
    pub async fn payment_report(
        &self,
        group_id: &str,
        year: i32,
        month: u32,
    ) -> DomainResult<PaymentReport> {
        let group = self.groups.get_group(group_id).await?.ok_or_else(|| {
            DomainError::validation(format!("Group not found: {}", group_id))
        })?;

        let roster = self
            .roster_service
            .load_roster(group_id, year, month, "", DaysFilter::All, None)
            .await?;

        if roster.members.is_empty() {
            return Err(DomainError::validation(
                "No members found to generate a report",
            ));
        }

        let mut paid = Vec::new();
        let mut unpaid = Vec::new();
        for member in roster.members {
            let row = ReportMember {
                name: member.name,
                phone: member.phone,
                upi_id: member.upi_id,
                days: member.days,
            };
            if member.payment_completed {
                paid.push(row);
            } else {
                unpaid.push(row);
            }
        }

        let generated_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(anyhow::Error::from)?;

        info!(
            "Assembled payment report for group {} ({} {}): {} paid, {} unpaid",
            group_id,
            month_name(month),
            year,
            paid.len(),
            unpaid.len()
        );

        Ok(PaymentReport {
            group_name: group.name,
            year,
            month,
            period: format!("{} {}", month_name(month), year),
            generated_at,
            paid,
            unpaid,
        })
    }
}
