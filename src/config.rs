// src/config.rs

//! Configuration loading utilities.
//!
//! Settings come from an optional `config.toml` next to the binary and fall
//! back to defaults when the file is absent or malformed. The target URL
//! list comes from a `webpath` text file; when that is missing or empty the
//! built-in list of known sites is used.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Built-in target URLs, used when no `webpath` file is present.
pub const FALLBACK_URLS: &[&str] = &[
    "https://www.devillegroups.com/allcalendar/?s=1758",
    "https://poolvillacity.co.th/CITY-743",
    "https://www.pattayapartypoolvilla.com/v/2246",
];

/// Immutable run configuration, constructed once and passed explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Consecutive months to scrape, starting at the current month.
    pub months_to_scrape: u32,

    /// Cap on discovered houses per site (0 = no limit).
    pub max_houses: usize,

    /// Bounded wait for page elements to render.
    pub wait_timeout_secs: u64,

    /// Shorter bounded wait for month-label headings.
    pub label_wait_timeout_secs: u64,

    /// Pause after in-place calendar repaints. The calendars swap content
    /// without any observable completion signal, so a fixed delay is the
    /// only option here.
    pub settle_ms: u64,

    /// Pause after loading index pages whose fragments stream in late.
    pub page_settle_ms: u64,

    /// Newline-delimited URL list file.
    pub urls_file: PathBuf,

    /// CSV output path.
    pub csv_path: PathBuf,

    /// Spreadsheet output path.
    pub xlsx_path: PathBuf,

    /// Where to dump page markup when a site yields zero records.
    pub debug_dump_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            months_to_scrape: 5,
            max_houses: 0,
            wait_timeout_secs: 15,
            label_wait_timeout_secs: 10,
            settle_ms: 2000,
            page_settle_ms: 8000,
            urls_file: PathBuf::from("webpath"),
            csv_path: PathBuf::from("booking_result.csv"),
            xlsx_path: PathBuf::from("booking_result.xlsx"),
            debug_dump_path: PathBuf::from("debug_calendar.html"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.months_to_scrape == 0 {
            return Err(AppError::config("months_to_scrape must be at least 1"));
        }
        Ok(())
    }

    /// Load configuration, falling back to defaults if loading fails.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::debug!("No config at {}: {e}. Using defaults.", path.display());
            Self::default()
        })
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn label_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.label_wait_timeout_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }
}

fn url_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").expect("hardcoded pattern"))
}

/// Read the URL list file. Each non-empty, non-comment line contributes the
/// first `http(s)://` token found in it, so a "label<tab>url" layout works.
/// A missing file yields an empty list.
pub fn load_urls(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };

    content
        .lines()
        .filter_map(|raw| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            url_token_re().find(line).map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Resolve the target URL list: file contents first, built-ins as fallback.
pub fn target_urls(config: &Config) -> Vec<String> {
    let urls = load_urls(&config.urls_file);
    if urls.is_empty() {
        log::info!(
            "No URL list at {}; using built-in targets",
            config.urls_file.display()
        );
        FALLBACK_URLS.iter().map(|s| s.to_string()).collect()
    } else {
        urls
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_urls_extracts_first_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment line").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "villa-a\thttps://example.com/a").unwrap();
        writeln!(file, "https://example.com/b extra").unwrap();
        writeln!(file, "no url on this line").unwrap();
        file.flush().unwrap();

        let urls = load_urls(file.path());
        assert_eq!(
            urls,
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_load_urls_missing_file() {
        assert!(load_urls(Path::new("/nonexistent/webpath")).is_empty());
    }

    #[test]
    fn test_target_urls_falls_back() {
        let config = Config {
            urls_file: PathBuf::from("/nonexistent/webpath"),
            ..Config::default()
        };
        let urls = target_urls(&config);
        assert_eq!(urls.len(), FALLBACK_URLS.len());
        assert!(urls[0].contains("devillegroups.com"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.months_to_scrape, 5);
        assert_eq!(config.max_houses, 0);
        assert_eq!(config.wait_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_load_rejects_zero_months() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "months_to_scrape = 0").unwrap();
        file.flush().unwrap();

        let result = Config::load(file.path());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_config_partial_toml() {
        let config: Config = toml::from_str("months_to_scrape = 3").unwrap();
        assert_eq!(config.months_to_scrape, 3);
        assert_eq!(config.max_houses, 0);
    }
}
