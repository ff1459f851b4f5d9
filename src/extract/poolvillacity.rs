// src/extract/poolvillacity.rs

//! Pool Villa City extractor.
//!
//! A single FullCalendar grid on one page; advancing months means clicking
//! the "next" control. Booked cells expose an explicit ISO `data-date`
//! attribute, so no text parsing is needed. Dates are collected into a set
//! across rounds, which makes re-scans after each click naturally
//! duplicate-free.

use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{BookingRecord, House};
use crate::normalize::buddhist_label;
use crate::render::{Locator, Page};

use super::{Extractor, log_booked_days};

const WEBSITE: &str = "Pool Villa City";

/// Signals the grid has rendered.
pub const DAY_CELL: &str = ".fc-daygrid-day";

/// Day cells whose nested background event carries the booked fill color.
pub const BOOKED_DAY_CELLS: &str = "//td[contains(@class,'fc-daygrid-day') and @data-date \
     and .//div[contains(@class,'fc-bg-event') and contains(@style,'rgb(248, 229, 231)')]]";

/// Looser fallback: any day cell containing a background event.
pub const BOOKED_DAY_CELLS_LOOSE: &str =
    "//td[contains(@class,'fc-daygrid-day') and .//div[contains(@class,'fc-bg-event')]]";

/// Forward-navigation control.
pub const NEXT_BUTTON: &str = "//button[contains(@class,'fc-next-button') \
     or contains(@aria-label,'next') or contains(@title,'Next')]";

fn house_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(CITY-\d+)").expect("hardcoded pattern"))
}

/// Group collected ISO dates into booking records, windowed to the months
/// requested. Dates before the current month, dates past the window, and
/// strings that don't form a real calendar date are dropped.
pub fn group_booked_dates(
    dates: &BTreeSet<String>,
    house: &House,
    start: NaiveDate,
    months: u32,
) -> Vec<BookingRecord> {
    let mut records = Vec::new();

    for date_str in dates {
        let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
            continue;
        };
        let months_diff =
            (date.year() - start.year()) * 12 + date.month() as i32 - start.month() as i32;
        if months_diff < 0 || months_diff >= months as i32 {
            continue;
        }
        let Some(label) = buddhist_label(date.year(), date.month()) else {
            continue;
        };
        records.push(BookingRecord::booked(WEBSITE, house, &label, date.day()));
    }
    records
}

pub struct PoolVillaCityExtractor {
    months: u32,
    wait_timeout: Duration,
    settle: Duration,
    start: NaiveDate,
}

impl PoolVillaCityExtractor {
    pub fn new(config: &Config, start: NaiveDate) -> Self {
        Self {
            months: config.months_to_scrape,
            wait_timeout: config.wait_timeout(),
            settle: config.settle(),
            start,
        }
    }

    fn scan_round(&self, page: &dyn Page, dates: &mut BTreeSet<String>) -> Result<()> {
        let mut cells = page.find_all(Locator::XPath(BOOKED_DAY_CELLS))?;
        if cells.is_empty() {
            cells = page.find_all(Locator::XPath(BOOKED_DAY_CELLS_LOOSE))?;
        }

        for cell in cells {
            let class = cell.attr("class")?.unwrap_or_default();
            // Adjacent-month and disabled cells carry date attributes too
            if class.contains("fc-day-other") || class.contains("fc-day-disabled") {
                continue;
            }
            match cell.attr("data-date")? {
                Some(date) if !date.is_empty() => {
                    dates.insert(date);
                }
                _ => {
                    log::debug!("{}", AppError::cell_parse("booked cell without data-date"));
                }
            }
        }
        Ok(())
    }
}

impl Extractor for PoolVillaCityExtractor {
    fn website(&self) -> &'static str {
        WEBSITE
    }

    fn extract(&self, page: &dyn Page, url: &str) -> Result<Vec<BookingRecord>> {
        log::info!("Loading Pool Villa City page...");

        let code = house_code_re()
            .captures(url)
            .map(|caps| caps[1].to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        page.navigate(url).map_err(|e| AppError::site(url, e))?;

        let name = match page.wait_for(Locator::Css("h1"), self.wait_timeout) {
            Ok(heading) => {
                let text = heading.text().unwrap_or_default().trim().to_string();
                if text.is_empty() { code.clone() } else { text }
            }
            Err(_) => code.clone(),
        };
        let house = House {
            id: code.clone(),
            name,
            code,
        };
        log::info!("  house: {} ({})", house.name, house.code);

        if page
            .wait_for(Locator::Css(DAY_CELL), self.wait_timeout)
            .is_err()
        {
            log::warn!("  calendar grid did not render in time; scanning anyway");
        }

        let mut booked_dates = BTreeSet::new();
        for round in 0..self.months {
            self.scan_round(page, &mut booked_dates)?;

            if round + 1 < self.months {
                match page.find(Locator::XPath(NEXT_BUTTON))? {
                    Some(next) => {
                        next.click()?;
                        // The grid repaints in place; nothing to wait on.
                        thread::sleep(self.settle);
                    }
                    None => break,
                }
            }
        }

        let records = group_booked_dates(&booked_dates, &house, self.start, self.months);

        // Records come out in ascending date order, so months group cleanly.
        let mut by_month: Vec<(String, Vec<u32>)> = Vec::new();
        for record in &records {
            match by_month.last_mut() {
                Some((label, days)) if *label == record.month_label => days.push(record.day),
                _ => by_month.push((record.month_label.clone(), vec![record.day])),
            }
        }
        for (label, days) in &by_month {
            log_booked_days(label, days);
        }
        if by_month.is_empty() {
            log::info!("  no booked days found (fully free, or selectors need review)");
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> House {
        House {
            id: "CITY-743".to_string(),
            name: "City Villa".to_string(),
            code: "CITY-743".to_string(),
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    #[test]
    fn test_group_emits_buddhist_labels() {
        let dates: BTreeSet<String> = ["2026-03-05".to_string()].into();
        let records = group_booked_dates(&dates, &house(), start(), 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].month_label, "มีนาคม 2569");
        assert_eq!(records[0].day, 5);
        assert_eq!(records[0].website, WEBSITE);
    }

    #[test]
    fn test_group_set_deduplicates_rescans() {
        // The same date seen across three scans collapses in the set
        let mut dates = BTreeSet::new();
        for _ in 0..3 {
            dates.insert("2026-03-05".to_string());
        }
        let records = group_booked_dates(&dates, &house(), start(), 5);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_group_drops_past_months() {
        let dates: BTreeSet<String> =
            ["2025-12-31".to_string(), "2026-01-15".to_string()].into();
        let records = group_booked_dates(&dates, &house(), start(), 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].day, 15);
    }

    #[test]
    fn test_group_windows_to_requested_months() {
        // Grid may show more months than requested
        let dates: BTreeSet<String> =
            ["2026-02-01".to_string(), "2026-06-01".to_string()].into();
        let records = group_booked_dates(&dates, &house(), start(), 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].month_label, "กุมภาพันธ์ 2569");
    }

    #[test]
    fn test_group_rejects_malformed_dates() {
        let dates: BTreeSet<String> = [
            "2026-02-30".to_string(),
            "not-a-date".to_string(),
            "2026-02-10".to_string(),
        ]
        .into();
        let records = group_booked_dates(&dates, &house(), start(), 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].day, 10);
    }

    #[test]
    fn test_group_preserves_date_order() {
        let dates: BTreeSet<String> = [
            "2026-03-05".to_string(),
            "2026-01-20".to_string(),
            "2026-03-01".to_string(),
        ]
        .into();
        let records = group_booked_dates(&dates, &house(), start(), 5);
        let days: Vec<u32> = records.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![20, 1, 5]);
    }
}
