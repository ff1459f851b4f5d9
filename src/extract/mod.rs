// src/extract/mod.rs

//! Per-site booking-calendar extractors.
//!
//! Each supported site gets one [`Extractor`] implementation; adding a new
//! site means adding one variant here, not editing a dispatcher.

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::Result;
use crate::models::{BookingRecord, SiteVariant};
use crate::render::Page;

pub mod deville;
pub mod pattayaparty;
pub mod poolvillacity;

pub use deville::DevilleExtractor;
pub use pattayaparty::PattayaPartyExtractor;
pub use poolvillacity::PoolVillaCityExtractor;

/// One site's extraction algorithm.
pub trait Extractor {
    /// Site label for the exported `website` column.
    fn website(&self) -> &'static str;

    /// Drive the rendered page and emit booking records for one URL.
    fn extract(&self, page: &dyn Page, url: &str) -> Result<Vec<BookingRecord>>;
}

/// Pick the extractor for a classified site. `Unknown` has none; the
/// orchestrator logs and skips those URLs.
pub fn for_variant(
    variant: SiteVariant,
    config: &Config,
    start: NaiveDate,
) -> Option<Box<dyn Extractor>> {
    match variant {
        SiteVariant::Deville => Some(Box::new(DevilleExtractor::new(config, start))),
        SiteVariant::PoolVillaCity => Some(Box::new(PoolVillaCityExtractor::new(config, start))),
        SiteVariant::PattayaParty => Some(Box::new(PattayaPartyExtractor::new(config, start))),
        SiteVariant::Unknown => None,
    }
}

/// Per-month console summary: booked day list or "free".
pub(crate) fn log_booked_days(label: &str, days: &[u32]) {
    if days.is_empty() {
        log::info!("  {label}: free");
    } else {
        let list = days
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        log::info!("  {label}: {} booked -> [{list}]", days.len());
    }
}
