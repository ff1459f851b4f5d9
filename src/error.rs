// src/error.rs

//! Unified error handling for the crawler application.
//!
//! The variants mirror the containment layers of the scrape loop: a cell
//! failure skips one cell, an iteration failure skips one month, a house
//! failure skips one house, and a site failure skips one URL. Only the
//! browser session failing to start aborts the run.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Browser session or DOM interaction failed
    #[error("Render error: {0}")]
    Render(String),

    /// Bounded wait expired before the element appeared
    #[error("Timed out waiting for '{selector}'")]
    WaitTimeout { selector: String },

    /// A single grid cell's text/attributes did not parse as expected
    #[error("Cell parse error: {0}")]
    CellParse(String),

    /// One month/page failed to load or its booked-cell scan failed
    #[error("Month iteration failed ({context}): {message}")]
    Iteration { context: String, message: String },

    /// One house's entire month loop failed
    #[error("House '{house}' failed: {message}")]
    House { house: String, message: String },

    /// One URL's extractor failed outright
    #[error("Site extraction failed for {url}: {message}")]
    Site { url: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSV export failed
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet export failed
    #[error("Spreadsheet export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl AppError {
    /// Create a render error from any displayable cause.
    pub fn render(message: impl fmt::Display) -> Self {
        Self::Render(message.to_string())
    }

    /// Create a wait-timeout error for a selector.
    pub fn wait_timeout(selector: impl Into<String>) -> Self {
        Self::WaitTimeout {
            selector: selector.into(),
        }
    }

    /// Create a cell parse error.
    pub fn cell_parse(message: impl Into<String>) -> Self {
        Self::CellParse(message.into())
    }

    /// Create a month-iteration error with context.
    pub fn iteration(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Iteration {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a house-level error.
    pub fn house(house: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::House {
            house: house.into(),
            message: message.to_string(),
        }
    }

    /// Create a site-level error.
    pub fn site(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Site {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
