// src/extract/pattayaparty.rs

//! Pattaya Party Pool Villa extractor.
//!
//! A single-month grid built from generic block elements rather than a
//! table, with "today" and "next" controls. The grid pads each month with
//! dimmed days from adjacent months, so cells are accepted only when they
//! are styled booked, not dimmed, and carry a day number that fits the
//! expected month.

use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use chrono::{Datelike, Months, NaiveDate};
use regex::Regex;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{BookingRecord, House};
use crate::normalize::{THAI_MONTHS, days_in_month, thai_month_line};
use crate::render::{Locator, Page};

use super::{Extractor, log_booked_days};

const WEBSITE: &str = "Pattaya Party Pool Villa";

/// Reset control back to the current month.
pub const TODAY_BUTTON: &str =
    "//button[contains(text(),'วันนี้') or contains(@title,'กลับไปเดือนปัจจุบัน')]";

/// Forward-navigation control.
pub const NEXT_BUTTON: &str =
    "//button[contains(text(),'Next') or contains(text(),'►') or contains(text(),'>')]";

/// Week-grid containers; the first holds the weekday-name header row, the
/// second the day cells.
pub const CALENDAR_GRID: &str = "div.grid.grid-cols-7";

/// Day cells of the second grid container.
pub const SECOND_GRID_CELLS: &str =
    "(//div[contains(@class,'grid-cols-7')])[2]//div[contains(@class,'aspect-square')]";

/// Day cells when only one grid container is present.
pub const FIRST_GRID_CELLS: &str =
    "(//div[contains(@class,'grid-cols-7')])[1]//div[contains(@class,'aspect-square')]";

/// Last-resort fallback: every aspect-square block on the page.
pub const ANY_CELLS: &str = "div.aspect-square";

/// Any element containing one of the twelve Thai month names.
pub fn month_heading_xpath() -> &'static str {
    static XPATH: OnceLock<String> = OnceLock::new();
    XPATH.get_or_init(|| {
        let clauses = THAI_MONTHS
            .iter()
            .map(|name| format!("contains(text(),'{name}')"))
            .collect::<Vec<_>>()
            .join(" or ");
        format!("//*[{clauses}]")
    })
}

fn villa_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/v/(\d+)").expect("hardcoded pattern"))
}

fn first_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("hardcoded pattern"))
}

/// Decide whether one day cell is a booked in-month day.
///
/// Dimmed cells belong to an adjacent month and are skipped regardless of
/// their background; booked cells must carry the red-background signature
/// and a day number within [1, days_in_month].
pub fn evaluate_day_cell(class: &str, text: &str, days_in_month: u32) -> Option<u32> {
    if class.contains("text-gray") {
        return None;
    }
    if !class.contains("bg-red") {
        return None;
    }
    let day: u32 = first_number_re().find(text)?.as_str().parse().ok()?;
    (1..=days_in_month).contains(&day).then_some(day)
}

pub struct PattayaPartyExtractor {
    months: u32,
    wait_timeout: Duration,
    settle: Duration,
    start: NaiveDate,
    debug_dump_path: std::path::PathBuf,
}

impl PattayaPartyExtractor {
    pub fn new(config: &Config, start: NaiveDate) -> Self {
        Self {
            months: config.months_to_scrape,
            wait_timeout: config.wait_timeout(),
            settle: config.settle(),
            start,
            debug_dump_path: config.debug_dump_path.clone(),
        }
    }

    fn scrape_month(
        &self,
        page: &dyn Page,
        house: &House,
        offset: u32,
    ) -> Result<Vec<BookingRecord>> {
        let target = self.start + Months::new(offset);
        let bound = days_in_month(target.year(), target.month()).unwrap_or(31);
        let fallback_label = target.format("%Y-%m").to_string();
        let label = self.read_month_label(page).unwrap_or(fallback_label);

        let context = format!("{} month {}", house.code, offset + 1);
        let grids = page
            .find_all(Locator::Css(CALENDAR_GRID))
            .map_err(|e| AppError::iteration(context.as_str(), e))?;
        let cells = if grids.len() > 1 {
            page.find_all(Locator::XPath(SECOND_GRID_CELLS))
        } else if grids.len() == 1 {
            page.find_all(Locator::XPath(FIRST_GRID_CELLS))
        } else {
            page.find_all(Locator::Css(ANY_CELLS))
        }
        .map_err(|e| AppError::iteration(context.as_str(), e))?;

        let mut days = BTreeSet::new();
        for cell in cells {
            let class = cell.attr("class").unwrap_or_default().unwrap_or_default();
            let text = cell.text().unwrap_or_default();
            if let Some(day) = evaluate_day_cell(&class, &text, bound) {
                days.insert(day);
            }
        }

        let days: Vec<u32> = days.into_iter().collect();
        log_booked_days(&label, &days);

        Ok(days
            .iter()
            .map(|&day| BookingRecord::booked(WEBSITE, house, &label, day))
            .collect())
    }

    /// Month label from the calendar heading. `None` when no heading with a
    /// Thai month name is present; the caller then falls back to the
    /// expected `YYYY-MM`.
    fn read_month_label(&self, page: &dyn Page) -> Option<String> {
        let heading = page
            .find(Locator::XPath(month_heading_xpath()))
            .ok()
            .flatten()?;
        let text = heading.text().ok()?;
        thai_month_line(&text).or_else(|| {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
    }

    /// Best-effort structure dump when a run yields nothing, to aid future
    /// selector maintenance.
    fn dump_diagnostics(&self, page: &dyn Page) {
        log::warn!("  no bookings found; dumping page structure for selector maintenance");

        let tables = page.find_all(Locator::Css("table")).map_or(0, |v| v.len());
        let cells = page.find_all(Locator::Css("td")).map_or(0, |v| v.len());
        log::warn!("  tables: {tables}, table cells: {cells}");

        let mut classes = BTreeSet::new();
        if let Ok(elements) = page.find_all(Locator::XPath("//*[contains(@class,'bg-')]")) {
            for element in elements.iter().take(50) {
                if let Ok(Some(attr)) = element.attr("class") {
                    for class in attr.split_whitespace().filter(|c| c.contains("bg-")) {
                        classes.insert(class.to_string());
                    }
                }
            }
        }
        if !classes.is_empty() {
            let sample: Vec<&String> = classes.iter().take(10).collect();
            log::warn!("  background classes: {sample:?}");
        }

        match page.source() {
            Ok(html) => match std::fs::write(&self.debug_dump_path, html) {
                Ok(()) => log::warn!(
                    "  page source saved to {}",
                    self.debug_dump_path.display()
                ),
                Err(e) => log::debug!("  could not save page source: {e}"),
            },
            Err(e) => log::debug!("  could not read page source: {e}"),
        }
    }
}

impl Extractor for PattayaPartyExtractor {
    fn website(&self) -> &'static str {
        WEBSITE
    }

    fn extract(&self, page: &dyn Page, url: &str) -> Result<Vec<BookingRecord>> {
        log::info!("Loading Pattaya Party Pool Villa page...");

        let (id, code) = match villa_id_re().captures(url) {
            Some(caps) => (caps[1].to_string(), format!("DV-{}", &caps[1])),
            None => ("Unknown".to_string(), "Unknown".to_string()),
        };

        page.navigate(url).map_err(|e| AppError::site(url, e))?;

        // Reset to the current month first; absence of the control is fine.
        if let Ok(button) = page.wait_for(Locator::XPath(TODAY_BUTTON), self.wait_timeout) {
            if button.click().is_ok() {
                thread::sleep(self.settle);
            }
        }

        let title = page.title().unwrap_or_default();
        let name = title
            .split('|')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| format!("Villa {id}"));
        let house = House { id, name, code };
        log::info!("  house: {} ({})", house.name, house.code);

        let mut records = Vec::new();
        for offset in 0..self.months {
            if offset > 0 {
                match page.wait_for(Locator::XPath(NEXT_BUTTON), self.wait_timeout) {
                    Ok(button) => match button.click() {
                        Ok(()) => thread::sleep(self.settle),
                        Err(e) => {
                            log::warn!("  next-month control unusable: {e}");
                            break;
                        }
                    },
                    Err(_) => {
                        log::warn!("  next-month control not found; stopping early");
                        break;
                    }
                }
            }

            match self.scrape_month(page, &house, offset) {
                Ok(month_records) => records.extend(month_records),
                Err(e) => log::warn!("  month {}: {e}", offset + 1),
            }
        }

        if records.is_empty() {
            self.dump_diagnostics(page);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booked_cell_accepted() {
        assert_eq!(
            evaluate_day_cell("aspect-square bg-red-500 text-white", "15", 30),
            Some(15)
        );
        // number embedded in other text still counts
        assert_eq!(
            evaluate_day_cell("aspect-square bg-red-500", "12\nจองแล้ว", 31),
            Some(12)
        );
    }

    #[test]
    fn test_dimmed_cell_skipped_even_when_booked() {
        assert_eq!(
            evaluate_day_cell("aspect-square bg-red-500 text-gray-400", "15", 30),
            None
        );
    }

    #[test]
    fn test_unbooked_cell_skipped() {
        assert_eq!(evaluate_day_cell("aspect-square", "15", 30), None);
        assert_eq!(
            evaluate_day_cell("aspect-square bg-yellow-200", "15", 30),
            None
        );
    }

    #[test]
    fn test_day_out_of_bounds_rejected() {
        // "31" in a 30-day month must not produce a record
        assert_eq!(evaluate_day_cell("bg-red-500", "31", 30), None);
        assert_eq!(evaluate_day_cell("bg-red-500", "30", 30), Some(30));
        assert_eq!(evaluate_day_cell("bg-red-500", "0", 30), None);
    }

    #[test]
    fn test_cell_without_number_rejected() {
        assert_eq!(evaluate_day_cell("bg-red-500", "จอง", 30), None);
        assert_eq!(evaluate_day_cell("bg-red-500", "", 30), None);
    }

    #[test]
    fn test_month_heading_xpath_covers_all_months() {
        let xpath = month_heading_xpath();
        for name in THAI_MONTHS {
            assert!(xpath.contains(name));
        }
    }
}
