// src/pipeline/mod.rs

//! Run orchestration: classify each URL, run its extractor, aggregate the
//! results in source order, and filter out past dates.
//!
//! Every per-site failure is contained here; the run always completes and
//! exports whatever was gathered.

use chrono::NaiveDate;

use crate::config::Config;
use crate::extract;
use crate::filter::filter_past;
use crate::models::{BookingRecord, SiteVariant};
use crate::render::Page;

/// Summary of one scrape run.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Records that survived past-date filtering, in aggregation order.
    pub records: Vec<BookingRecord>,

    /// Record count before filtering.
    pub total_extracted: usize,

    /// How many past-date records were removed.
    pub filtered_out: usize,

    /// URLs whose extractor failed outright.
    pub sites_failed: usize,

    /// URLs skipped because their domain is not recognized.
    pub sites_skipped: usize,
}

/// Process the URL list sequentially and produce the filtered record table.
pub fn run(config: &Config, page: &dyn Page, urls: &[String], today: NaiveDate) -> RunOutcome {
    let mut outcome = RunOutcome::default();
    let mut all_records = Vec::new();

    for url in urls {
        let variant = SiteVariant::classify(url);

        log::info!("{}", "=".repeat(60));
        log::info!("URL: {url}");
        log::info!("site type: {}", variant.label());

        let Some(extractor) = extract::for_variant(variant, config, today) else {
            outcome.sites_skipped += 1;
            log::warn!("Unknown site type, skipping: {url}");
            continue;
        };

        match extractor.extract(page, url) {
            Ok(records) => {
                log::info!("{} record(s) from {url}", records.len());
                all_records.extend(records);
            }
            Err(e) => {
                outcome.sites_failed += 1;
                log::error!("{e}");
            }
        }
    }

    outcome.total_extracted = all_records.len();
    outcome.records = filter_past(all_records, today);
    outcome.filtered_out = outcome.total_extracted - outcome.records.len();
    outcome
}
