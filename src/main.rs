// src/main.rs

//! Pool-villa calendar crawler entry point.
//!
//! One run: load configuration and targets, start the browser session,
//! extract bookings from every URL, filter past dates, export. A run that
//! finishes with zero records is a warning, not a failure; only a browser
//! that refuses to start aborts before export.

use std::path::Path;

use chrono::Local;

use villacal::config::{self, Config};
use villacal::error::Result;
use villacal::export;
use villacal::pipeline;
use villacal::render::ChromeSession;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    init_logging();

    log::info!("Pool villa calendar crawler starting...");
    log::info!("supported sites: devillegroups.com, poolvillacity.co.th, pattayapartypoolvilla.com");

    let config = Config::load_or_default(Path::new("config.toml"));
    let urls = config::target_urls(&config);

    log::info!("URLs to scrape:");
    for (idx, url) in urls.iter().enumerate() {
        log::info!("  {}. {url}", idx + 1);
    }

    // The only fatal failure path: no browser, no run.
    let session = ChromeSession::launch()?;

    let today = Local::now().date_naive();
    let outcome = pipeline::run(&config, &session, &urls, today);

    if outcome.filtered_out > 0 {
        log::info!("Filtered out {} past-date record(s)", outcome.filtered_out);
    }

    log::info!("{}", "=".repeat(60));
    if outcome.records.is_empty() {
        log::warn!("No booking records found");
        log::warn!("The sites' markup may have changed; selectors may need maintenance");
    } else {
        // An export failure still gets the closing summary.
        match export::export(&outcome.records, &config) {
            Ok(()) => log::info!(
                "Done: {} record(s) ({} before filtering)",
                outcome.records.len(),
                outcome.total_extracted
            ),
            Err(e) => log::error!("Export failed: {e}"),
        }
    }
    if outcome.sites_failed > 0 || outcome.sites_skipped > 0 {
        log::warn!(
            "{} site(s) failed, {} skipped as unknown",
            outcome.sites_failed,
            outcome.sites_skipped
        );
    }
    log::info!("{}", "=".repeat(60));

    Ok(())
}
