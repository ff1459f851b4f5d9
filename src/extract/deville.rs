// src/extract/deville.rs

//! Deville Groups extractor.
//!
//! One index page embeds every house, each exposing its booking calendar as
//! a query-parameterized sub-resource. Houses are discovered by scanning the
//! server-rendered markup for the heading/calendar-reference pairs; the
//! per-month calendars are then navigated to directly, one page load per
//! house-month.

use std::collections::HashSet;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use chrono::{Datelike, Months, NaiveDate};
use regex::Regex;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{BookingRecord, House};
use crate::normalize::{buddhist_year_line, days_in_month};
use crate::render::{Locator, Page};

use super::{Extractor, log_booked_days};

const WEBSITE: &str = "Deville Groups";

/// Month-parameterized calendar endpoint.
pub const CALENDAR_BASE: &str = "https://www.devillegroups.com/allcalendar/cld.php";

/// Heading cell carrying the Buddhist-year month label.
pub const MONTH_HEADING: &str = "//th[contains(text(),'256') or contains(text(),'257')]";

/// Cells styled as booked.
pub const BOOKED_CELLS: &str = "//td[contains(@class,'booking') or contains(@style,'red')]";

/// The index pairs a `(DV-xxxx)` heading with the calendar reference that
/// carries the house identifier.
fn house_listing_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<h6>\(DV-(\d+)\)<br>([^<]+)</h6>.*?src="cld\.php\?hId=(\d+)""#)
            .expect("hardcoded pattern")
    })
}

/// Parse house listings out of the index-page markup, deduplicated by
/// calendar identifier.
pub fn parse_house_listing(html: &str) -> Vec<House> {
    let mut houses = Vec::new();
    let mut seen = HashSet::new();

    for caps in house_listing_re().captures_iter(html) {
        let id = caps[3].to_string();
        if !seen.insert(id.clone()) {
            continue;
        }
        houses.push(House {
            id,
            name: caps[2].trim().to_string(),
            code: format!("DV-{}", &caps[1]),
        });
    }
    houses
}

/// A booked cell counts only when its text is a bare day number within the
/// month; anything else is a decorative or out-of-month cell.
pub fn parse_day_cell(text: &str, days_in_month: u32) -> Option<u32> {
    let day: u32 = text.trim().parse().ok()?;
    (1..=days_in_month).contains(&day).then_some(day)
}

pub struct DevilleExtractor {
    months: u32,
    max_houses: usize,
    label_timeout: Duration,
    page_settle: Duration,
    start: NaiveDate,
}

impl DevilleExtractor {
    pub fn new(config: &Config, start: NaiveDate) -> Self {
        Self {
            months: config.months_to_scrape,
            max_houses: config.max_houses,
            label_timeout: config.label_wait_timeout(),
            page_settle: config.page_settle(),
            start,
        }
    }

    fn scrape_house(&self, page: &dyn Page, house: &House) -> Result<Vec<BookingRecord>> {
        let mut records = Vec::new();
        let mut failures = 0u32;

        for offset in 0..self.months {
            let target = self.start + Months::new(offset);
            let ym = target.format("%Y-%m").to_string();
            match self.scrape_month(page, house, target, &ym) {
                Ok(month_records) => records.extend(month_records),
                Err(e) => {
                    failures += 1;
                    log::warn!("  {} {ym}: {e}", house.code);
                }
            }
        }

        if failures == self.months && self.months > 0 {
            return Err(AppError::house(&house.name, "every month iteration failed"));
        }
        Ok(records)
    }

    fn scrape_month(
        &self,
        page: &dyn Page,
        house: &House,
        target: NaiveDate,
        ym: &str,
    ) -> Result<Vec<BookingRecord>> {
        let calendar_url = format!("{CALENDAR_BASE}?ym={ym}&hId={}", house.id);
        page.navigate(&calendar_url)
            .map_err(|e| AppError::iteration(format!("{} {ym}", house.code), e))?;

        // Fall back to the requested year-month when the heading never shows.
        let month_label = match page.wait_for(Locator::XPath(MONTH_HEADING), self.label_timeout) {
            Ok(heading) => buddhist_year_line(&heading.text().unwrap_or_default())
                .unwrap_or_else(|| ym.to_string()),
            Err(_) => ym.to_string(),
        };

        let bound = days_in_month(target.year(), target.month()).unwrap_or(31);
        let cells = page
            .find_all(Locator::XPath(BOOKED_CELLS))
            .map_err(|e| AppError::iteration(format!("{} {ym}", house.code), e))?;

        let mut days = Vec::new();
        for cell in cells {
            if let Some(day) = parse_day_cell(&cell.text().unwrap_or_default(), bound) {
                days.push(day);
            }
        }
        days.sort_unstable();
        log_booked_days(&month_label, &days);

        Ok(days
            .iter()
            .map(|&day| BookingRecord::booked(WEBSITE, house, &month_label, day))
            .collect())
    }
}

impl Extractor for DevilleExtractor {
    fn website(&self) -> &'static str {
        WEBSITE
    }

    fn extract(&self, page: &dyn Page, url: &str) -> Result<Vec<BookingRecord>> {
        log::info!("Loading Deville Groups index page...");
        page.navigate(url)
            .map_err(|e| AppError::site(url, e))?;
        // The calendar fragments stream in after the document itself with no
        // observable completion signal.
        thread::sleep(self.page_settle);

        let html = page.source().map_err(|e| AppError::site(url, e))?;
        let mut houses = parse_house_listing(&html);
        for house in &houses {
            log::info!("  found house: {} ({}, hId={})", house.name, house.code, house.id);
        }
        log::info!("Discovered {} house(s)", houses.len());

        if houses.is_empty() {
            return Err(AppError::site(url, "no houses discovered on index page"));
        }
        if self.max_houses > 0 && houses.len() > self.max_houses {
            houses.truncate(self.max_houses);
            log::info!("Limiting to first {} house(s)", self.max_houses);
        }

        let total = houses.len();
        let mut records = Vec::new();
        for (idx, house) in houses.iter().enumerate() {
            log::info!(
                "[{}/{total}] scraping {} ({})",
                idx + 1,
                house.name,
                house.code
            );
            match self.scrape_house(page, house) {
                Ok(house_records) => records.extend(house_records),
                Err(e) => log::warn!("{e}"),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_HTML: &str = r#"
        <div class="villa"><h6>(DV-10)<br>Villa A</h6>
        <iframe src="cld.php?hId=101"></iframe></div>
        <div class="villa"><h6>(DV-20)<br>Villa B </h6>
        <iframe src="cld.php?hId=202"></iframe></div>
        <div class="villa"><h6>(DV-10)<br>Villa A</h6>
        <iframe src="cld.php?hId=101"></iframe></div>
    "#;

    #[test]
    fn test_parse_house_listing() {
        let houses = parse_house_listing(INDEX_HTML);
        assert_eq!(houses.len(), 2);
        assert_eq!(houses[0].code, "DV-10");
        assert_eq!(houses[0].name, "Villa A");
        assert_eq!(houses[0].id, "101");
        assert_eq!(houses[1].code, "DV-20");
        assert_eq!(houses[1].name, "Villa B");
    }

    #[test]
    fn test_parse_house_listing_empty() {
        assert!(parse_house_listing("<html><body>nothing</body></html>").is_empty());
    }

    #[test]
    fn test_parse_day_cell() {
        assert_eq!(parse_day_cell("5", 31), Some(5));
        assert_eq!(parse_day_cell(" 28 ", 31), Some(28));
        // decorative cells and out-of-range numbers are rejected
        assert_eq!(parse_day_cell("จอง", 31), None);
        assert_eq!(parse_day_cell("", 31), None);
        assert_eq!(parse_day_cell("0", 31), None);
        assert_eq!(parse_day_cell("31", 30), None);
        assert_eq!(parse_day_cell("1 2", 31), None);
    }
}
