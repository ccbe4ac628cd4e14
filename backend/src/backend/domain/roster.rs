//! Roster derivation logic for the promoter tracker.
//!
//! Decides which promoters count toward a calendar month, merges them with
//! that month's records, and applies the search and days/payment filters.
//! Everything here is a pure function over shared DTOs: the full pipeline
//! is re-run whenever the underlying data or the filter inputs change, so
//! the derived view can never drift from its sources.

use chrono::{Datelike, NaiveDate};
use shared::{DaysFilter, MergedMember, MonthlyRecord, Promoter};
use std::collections::HashMap;

/// Total order over (year, month) pairs. Adjacent months compare without
/// special-casing year rollover.
pub fn month_key(year: i32, month: u32) -> i32 {
    year * 12 + month as i32
}

/// Month key of a `YYYY-MM-DD` date string. `None` when the value is
/// missing or unparseable; a promoter whose dates cannot be compared is
/// never excluded by them.
fn date_month_key(date: Option<&str>) -> Option<i32> {
    let parsed = NaiveDate::parse_from_str(date?, "%Y-%m-%d").ok()?;
    Some(month_key(parsed.year(), parsed.month()))
}

/// Promoters considered enrolled during the selected month.
///
/// The join month itself is included; the leave month itself is excluded.
/// The asymmetry implements "leave_date is the first day of the month from
/// which the member no longer counts" and must not be evened out.
pub fn filter_active_promoters(promoters: &[Promoter], year: i32, month: u32) -> Vec<Promoter> {
    let selected_ym = month_key(year, month);

    promoters
        .iter()
        .filter(|p| {
            let join_ym = match date_month_key(p.join_date.as_deref()) {
                Some(ym) => ym,
                None => return true,
            };
            if join_ym > selected_ym {
                return false;
            }
            if let Some(leave_ym) = date_month_key(p.leave_date.as_deref()) {
                if leave_ym <= selected_ym {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Join active promoters with the month's records by promoter id.
///
/// Output order follows the promoter list. A promoter with no record yet
/// renders as `days = 0`, unpaid, with no record id; the record id is what
/// later writes use to turn an upsert into an explicit update.
pub fn merge_roster(active: &[Promoter], records: &[MonthlyRecord]) -> Vec<MergedMember> {
    let by_promoter: HashMap<&str, &MonthlyRecord> = records
        .iter()
        .map(|r| (r.promoter_id.as_str(), r))
        .collect();

    active
        .iter()
        .map(|p| {
            let record = by_promoter.get(p.id.as_str());
            MergedMember {
                id: p.id.clone(),
                group_id: p.group_id.clone(),
                name: p.name.clone(),
                phone: p.phone.clone(),
                upi_id: p.upi_id.clone(),
                join_date: p.join_date.clone(),
                leave_date: p.leave_date.clone(),
                days: record.map(|r| r.days).unwrap_or(0),
                payment_completed: record.map(|r| r.payment_completed).unwrap_or(false),
                record_id: record.map(|r| r.id.clone()),
            }
        })
        .collect()
}

/// Case-insensitive substring match over name, phone and UPI id.
/// An empty query matches everything; an absent UPI id never matches.
pub fn apply_search_filter(members: Vec<MergedMember>, query: &str) -> Vec<MergedMember> {
    if query.is_empty() {
        return members;
    }
    let needle = query.to_lowercase();

    members
        .into_iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle)
                || m.phone.to_lowercase().contains(&needle)
                || m.upi_id
                    .as_deref()
                    .map(|upi| upi.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .collect()
}

/// Categorical/range filter over the merged view.
///
/// A custom value that does not parse as an integer passes everything
/// through unfiltered; a parseable value that matches no member's day
/// count (e.g. a negative) simply matches nothing.
pub fn apply_days_filter(
    members: Vec<MergedMember>,
    filter: DaysFilter,
    custom_days: Option<&str>,
) -> Vec<MergedMember> {
    let custom = match filter {
        DaysFilter::Custom => match custom_days.and_then(|v| v.trim().parse::<i64>().ok()) {
            Some(value) => Some(value),
            None => return members,
        },
        _ => None,
    };

    members
        .into_iter()
        .filter(|m| {
            let d = m.days;
            match filter {
                DaysFilter::All => true,
                DaysFilter::Paid => m.payment_completed,
                DaysFilter::Unpaid => !m.payment_completed,
                DaysFilter::Zero => d == 0,
                DaysFilter::OneToTen => (1..=10).contains(&d),
                DaysFilter::ElevenToTwenty => (11..=20).contains(&d),
                DaysFilter::TwentyOneToThirty => (21..=30).contains(&d),
                DaysFilter::Custom => custom == Some(i64::from(d)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promoter(id: &str, join_date: Option<&str>, leave_date: Option<&str>) -> Promoter {
        Promoter {
            id: id.to_string(),
            group_id: "group::test".to_string(),
            name: format!("Promoter {}", id),
            phone: "9876543210".to_string(),
            upi_id: Some(format!("{}@upi", id)),
            join_date: join_date.map(|d| d.to_string()),
            leave_date: leave_date.map(|d| d.to_string()),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn record(promoter_id: &str, days: u32, payment_completed: bool) -> MonthlyRecord {
        MonthlyRecord {
            id: format!("record::{}", promoter_id),
            promoter_id: promoter_id.to_string(),
            group_id: "group::test".to_string(),
            year: 2025,
            month: 3,
            days,
            payment_completed,
        }
    }

    #[test]
    fn test_month_key_total_order() {
        assert_eq!(month_key(2025, 1), month_key(2024, 12) + 1);
        assert!(month_key(2025, 3) > month_key(2025, 2));
        assert!(month_key(2026, 1) > month_key(2025, 12));
    }

    #[test]
    fn test_missing_join_date_always_active() {
        let promoters = vec![promoter("p1", None, None)];
        for (year, month) in [(1999, 1), (2025, 6), (2099, 12)] {
            let active = filter_active_promoters(&promoters, year, month);
            assert_eq!(active.len(), 1, "expected active for {}/{}", month, year);
        }
    }

    #[test]
    fn test_join_month_is_first_active_month() {
        // Joins 2025-03-01, never leaves.
        let promoters = vec![promoter("p1", Some("2025-03-01"), None)];

        assert!(filter_active_promoters(&promoters, 2025, 2).is_empty());
        assert_eq!(filter_active_promoters(&promoters, 2025, 3).len(), 1);
        assert_eq!(filter_active_promoters(&promoters, 2025, 4).len(), 1);
        assert_eq!(filter_active_promoters(&promoters, 2026, 1).len(), 1);
    }

    #[test]
    fn test_leave_month_is_first_inactive_month() {
        // Joins 2025-01-01, leaves 2025-06-01.
        let promoters = vec![promoter("p1", Some("2025-01-01"), Some("2025-06-01"))];

        assert_eq!(filter_active_promoters(&promoters, 2025, 5).len(), 1);
        assert!(filter_active_promoters(&promoters, 2025, 6).is_empty());
        assert!(filter_active_promoters(&promoters, 2025, 7).is_empty());
        assert!(filter_active_promoters(&promoters, 2026, 1).is_empty());
    }

    #[test]
    fn test_join_across_year_rollover() {
        let promoters = vec![promoter("p1", Some("2024-12-15"), None)];
        assert_eq!(filter_active_promoters(&promoters, 2025, 1).len(), 1);
        assert!(filter_active_promoters(&promoters, 2024, 11).is_empty());
    }

    #[test]
    fn test_unparseable_dates_do_not_exclude() {
        let promoters = vec![promoter("p1", Some("not-a-date"), Some("also-bad"))];
        assert_eq!(filter_active_promoters(&promoters, 2025, 3).len(), 1);
    }

    #[test]
    fn test_merge_is_one_to_one_with_active_promoters() {
        let active = vec![
            promoter("p1", Some("2025-01-01"), None),
            promoter("p2", Some("2025-01-01"), None),
            promoter("p3", Some("2025-01-01"), None),
        ];
        let records = vec![record("p2", 12, true)];

        let merged = merge_roster(&active, &records);
        assert_eq!(merged.len(), active.len());

        // Order preserved, defaults applied where no record exists.
        assert_eq!(merged[0].id, "p1");
        assert_eq!(merged[0].days, 0);
        assert!(!merged[0].payment_completed);
        assert_eq!(merged[0].record_id, None);

        assert_eq!(merged[1].id, "p2");
        assert_eq!(merged[1].days, 12);
        assert!(merged[1].payment_completed);
        assert_eq!(merged[1].record_id, Some("record::p2".to_string()));

        assert_eq!(merged[2].record_id, None);
    }

    #[test]
    fn test_search_filter_matches_name_phone_and_upi() {
        let active = vec![
            promoter("asha", Some("2025-01-01"), None),
            promoter("ravi", Some("2025-01-01"), None),
        ];
        let merged = merge_roster(&active, &[]);

        let by_name = apply_search_filter(merged.clone(), "ASHA");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "asha");

        let by_upi = apply_search_filter(merged.clone(), "ravi@upi");
        assert_eq!(by_upi.len(), 1);

        let by_phone = apply_search_filter(merged.clone(), "98765");
        assert_eq!(by_phone.len(), 2);

        assert_eq!(apply_search_filter(merged, "").len(), 2);
    }

    #[test]
    fn test_search_filter_absent_upi_never_matches() {
        let mut p = promoter("p1", None, None);
        p.upi_id = None;
        let merged = merge_roster(&[p], &[]);
        assert!(apply_search_filter(merged, "@upi").is_empty());
    }

    #[test]
    fn test_days_filter_buckets() {
        // The "Asha" scenario: days=15, unpaid.
        let active = vec![promoter("asha", Some("2025-01-01"), None)];
        let merged = merge_roster(&active, &[record("asha", 15, false)]);

        assert!(apply_days_filter(merged.clone(), DaysFilter::OneToTen, None).is_empty());
        assert_eq!(apply_days_filter(merged.clone(), DaysFilter::ElevenToTwenty, None).len(), 1);
        assert_eq!(apply_days_filter(merged.clone(), DaysFilter::Unpaid, None).len(), 1);
        assert!(apply_days_filter(merged.clone(), DaysFilter::Paid, None).is_empty());
        assert!(apply_days_filter(merged.clone(), DaysFilter::Zero, None).is_empty());
        assert_eq!(apply_days_filter(merged, DaysFilter::All, None).len(), 1);
    }

    #[test]
    fn test_custom_days_filter_exact_match_and_fail_open() {
        let active = vec![
            promoter("a", Some("2025-01-01"), None),
            promoter("b", Some("2025-01-01"), None),
        ];
        let records = vec![record("a", 15, false), record("b", 7, false)];
        let merged = merge_roster(&active, &records);

        let exact = apply_days_filter(merged.clone(), DaysFilter::Custom, Some("15"));
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].id, "a");

        // Non-numeric input fails open.
        let open = apply_days_filter(merged.clone(), DaysFilter::Custom, Some("abc"));
        assert_eq!(open.len(), 2);
        let missing = apply_days_filter(merged.clone(), DaysFilter::Custom, None);
        assert_eq!(missing.len(), 2);

        // Parseable but unmatchable input matches nothing.
        assert!(apply_days_filter(merged, DaysFilter::Custom, Some("-5")).is_empty());
    }

    #[test]
    fn test_filter_pipeline_is_idempotent() {
        let active = vec![
            promoter("asha", Some("2025-01-01"), None),
            promoter("ravi", Some("2025-01-01"), None),
            promoter("meena", Some("2025-01-01"), None),
        ];
        let records = vec![record("asha", 15, false), record("ravi", 5, true)];
        let merged = merge_roster(&active, &records);

        let once = apply_days_filter(
            apply_search_filter(merged.clone(), "a"),
            DaysFilter::Unpaid,
            None,
        );
        let twice = apply_days_filter(
            apply_search_filter(once.clone(), "a"),
            DaysFilter::Unpaid,
            None,
        );
        assert_eq!(once, twice);
    }
}
