// src/normalize.rs

//! Month-label normalization.
//!
//! The sites label months in two conventions: Thai month names with a
//! Buddhist-era year ("มกราคม 2569") and bare Gregorian "YYYY-MM". Both
//! resolve to a canonical (year, month); anything else stays unresolved.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Thai calendar year = Gregorian year + 543.
pub const BUDDHIST_YEAR_OFFSET: i32 = 543;

/// The twelve canonical Thai month names, January first.
pub const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Canonical normalized month, or unresolved when the label didn't parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthKey {
    Resolved { year: i32, month: u32 },
    Unresolved,
}

fn buddhist_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(25\d{2}|26\d{2}|27\d{2})").expect("hardcoded pattern"))
}

fn iso_month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})").expect("hardcoded pattern"))
}

/// Normalize a site-native month label. Pure; malformed input always yields
/// `Unresolved`, never an error.
pub fn normalize_month_label(label: &str) -> MonthKey {
    for (idx, name) in THAI_MONTHS.iter().enumerate() {
        if !label.contains(name) {
            continue;
        }
        if let Some(caps) = buddhist_year_re().captures(label) {
            if let Ok(thai_year) = caps[1].parse::<i32>() {
                return MonthKey::Resolved {
                    year: thai_year - BUDDHIST_YEAR_OFFSET,
                    month: idx as u32 + 1,
                };
            }
        }
    }

    if let Some(caps) = iso_month_re().captures(label) {
        if let (Ok(year), Ok(month)) = (caps[1].parse::<i32>(), caps[2].parse::<u32>()) {
            return MonthKey::Resolved { year, month };
        }
    }

    MonthKey::Unresolved
}

/// Thai month name for a 1-based month number.
pub fn thai_month_name(month: u32) -> Option<&'static str> {
    THAI_MONTHS.get(month.checked_sub(1)? as usize).copied()
}

/// Human label in the Buddhist convention, e.g. (2026, 3) -> "มีนาคม 2569".
pub fn buddhist_label(year: i32, month: u32) -> Option<String> {
    let name = thai_month_name(month)?;
    Some(format!("{name} {}", year + BUDDHIST_YEAR_OFFSET))
}

/// Number of days in a Gregorian month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// First line of a heading that carries a Buddhist-year numeral. Month
/// headings often render as multi-line text with navigation captions around
/// the label itself.
pub fn buddhist_year_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| line.contains("256") || line.contains("257"))
        .map(str::to_string)
}

/// First line containing both a Thai month name and a Buddhist-year numeral.
pub fn thai_month_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| {
            THAI_MONTHS.iter().any(|name| line.contains(name))
                && (line.contains("256") || line.contains("257"))
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_thai_label() {
        assert_eq!(
            normalize_month_label("มกราคม 2569"),
            MonthKey::Resolved {
                year: 2026,
                month: 1
            }
        );
        assert_eq!(
            normalize_month_label("ปฏิทิน ธันวาคม 2568"),
            MonthKey::Resolved {
                year: 2025,
                month: 12
            }
        );
    }

    #[test]
    fn test_normalize_iso_label() {
        assert_eq!(
            normalize_month_label("2026-01"),
            MonthKey::Resolved {
                year: 2026,
                month: 1
            }
        );
    }

    #[test]
    fn test_normalize_unresolved() {
        assert_eq!(normalize_month_label("not a month"), MonthKey::Unresolved);
        assert_eq!(normalize_month_label(""), MonthKey::Unresolved);
        // Thai month without a Buddhist year stays unresolved
        assert_eq!(normalize_month_label("มกราคม"), MonthKey::Unresolved);
    }

    #[test]
    fn test_buddhist_label() {
        assert_eq!(buddhist_label(2026, 3).as_deref(), Some("มีนาคม 2569"));
        assert_eq!(buddhist_label(2026, 13), None);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 1), Some(31));
        assert_eq!(days_in_month(2026, 4), Some(30));
        assert_eq!(days_in_month(2026, 2), Some(28));
        assert_eq!(days_in_month(2028, 2), Some(29));
        assert_eq!(days_in_month(2026, 12), Some(31));
        assert_eq!(days_in_month(2026, 13), None);
    }

    #[test]
    fn test_buddhist_year_line() {
        assert_eq!(
            buddhist_year_line("ปฏิทินการจอง\nมกราคม 2569\nอา จ อ พ").as_deref(),
            Some("มกราคม 2569")
        );
        assert_eq!(buddhist_year_line("no year here"), None);
    }

    #[test]
    fn test_thai_month_line() {
        assert_eq!(
            thai_month_line("< Prev\nเมษายน 2569\nNext >").as_deref(),
            Some("เมษายน 2569")
        );
        // A month name without a year numeral does not qualify
        assert_eq!(thai_month_line("เมษายน\n2020"), None);
    }
}
