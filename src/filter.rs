// src/filter.rs

//! Past-date filtering.
//!
//! Fail-open: a record whose month label cannot be normalized, or whose day
//! does not form a real date in the resolved month, is kept for manual
//! review. Dropping a still-relevant booking is worse than retaining an
//! unparseable one.

use chrono::NaiveDate;

use crate::models::BookingRecord;
use crate::normalize::{MonthKey, normalize_month_label};

/// Keep records dated today or later; keep anything that doesn't resolve.
pub fn filter_past(records: Vec<BookingRecord>, today: NaiveDate) -> Vec<BookingRecord> {
    records
        .into_iter()
        .filter(|record| keep(record, today))
        .collect()
}

fn keep(record: &BookingRecord, today: NaiveDate) -> bool {
    match normalize_month_label(&record.month_label) {
        MonthKey::Resolved { year, month } => {
            match NaiveDate::from_ymd_opt(year, month, record.day) {
                Some(date) => date >= today,
                None => true,
            }
        }
        MonthKey::Unresolved => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::House;

    fn record(month_label: &str, day: u32) -> BookingRecord {
        let house = House {
            id: "1".to_string(),
            name: "Villa".to_string(),
            code: "DV-1".to_string(),
        };
        BookingRecord::booked("Deville Groups", &house, month_label, day)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    #[test]
    fn test_drops_past_dates() {
        let kept = filter_past(vec![record("มกราคม 2569", 9)], today());
        assert!(kept.is_empty());
    }

    #[test]
    fn test_keeps_today_and_future() {
        let kept = filter_past(
            vec![
                record("มกราคม 2569", 10),
                record("มกราคม 2569", 11),
                record("2026-02", 1),
            ],
            today(),
        );
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_keeps_unresolved_labels() {
        let kept = filter_past(vec![record("mystery month", 1)], today());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_keeps_unconstructible_dates() {
        // Feb 30 doesn't exist; fail open rather than silently dropping
        let kept = filter_past(vec![record("กุมภาพันธ์ 2569", 30)], today());
        assert_eq!(kept.len(), 1);
    }
}
