// src/render/mod.rs

//! Rendering collaborator abstraction.
//!
//! Extractors drive a rendered page through this interface only; the
//! concrete browser-automation technology lives behind [`ChromeSession`].
//! All interaction is synchronous and blocking, with bounded waits.

use std::fmt;
use std::time::Duration;

use crate::error::Result;

pub mod chrome;

pub use chrome::ChromeSession;

/// How to locate elements on the page.
#[derive(Debug, Clone, Copy)]
pub enum Locator<'a> {
    Css(&'a str),
    XPath(&'a str),
}

impl fmt::Display for Locator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) | Locator::XPath(s) => f.write_str(s),
        }
    }
}

/// A handle to one rendered element.
pub trait Element {
    /// Visible text content.
    fn text(&self) -> Result<String>;

    /// Attribute value, if the attribute is present.
    fn attr(&self, name: &str) -> Result<Option<String>>;

    /// Click the element.
    fn click(&self) -> Result<()>;
}

/// A rendered page the extractors can drive.
pub trait Page {
    /// Navigate to a URL and block until the navigation completes.
    fn navigate(&self, url: &str) -> Result<()>;

    /// Wait (bounded) for an element to appear. Expiry yields
    /// [`crate::error::AppError::WaitTimeout`], which callers treat as a
    /// recoverable per-step signal.
    fn wait_for<'a>(
        &'a self,
        locator: Locator<'_>,
        timeout: Duration,
    ) -> Result<Box<dyn Element + 'a>>;

    /// Find the first matching element, `None` when absent.
    fn find<'a>(&'a self, locator: Locator<'_>) -> Result<Option<Box<dyn Element + 'a>>>;

    /// Find all matching elements; an empty vec when none match.
    fn find_all<'a>(&'a self, locator: Locator<'_>) -> Result<Vec<Box<dyn Element + 'a>>>;

    /// Full page markup as currently rendered.
    fn source(&self) -> Result<String>;

    /// Document title.
    fn title(&self) -> Result<String>;
}
