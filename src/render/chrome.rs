// src/render/chrome.rs

//! Headless Chrome implementation of the rendering collaborator.

use std::sync::Arc;
use std::time::Duration;

use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::{Browser, Element as ChromeElement, LaunchOptions, Tab};

use crate::error::{AppError, Result};

use super::{Element, Locator, Page};

/// One headless-Chrome session, scoped to the whole run: acquired once at
/// start, released on drop at the very end.
pub struct ChromeSession {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Launch a headless browser and open a tab. Failure here is the only
    /// fatal path in the application.
    pub fn launch() -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((1920, 1080)))
            .idle_browser_timeout(Duration::from_secs(600))
            .build()
            .map_err(AppError::render)?;

        let browser = Browser::new(options).map_err(AppError::render)?;
        let tab = browser.new_tab().map_err(AppError::render)?;

        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

impl Page for ChromeSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab.navigate_to(url).map_err(AppError::render)?;
        self.tab.wait_until_navigated().map_err(AppError::render)?;
        Ok(())
    }

    fn wait_for<'a>(
        &'a self,
        locator: Locator<'_>,
        timeout: Duration,
    ) -> Result<Box<dyn Element + 'a>> {
        let found = match locator {
            Locator::Css(sel) => self.tab.wait_for_element_with_custom_timeout(sel, timeout),
            Locator::XPath(sel) => self.tab.wait_for_xpath_with_custom_timeout(sel, timeout),
        };
        match found {
            Ok(element) => Ok(Box::new(element)),
            Err(_) => Err(AppError::wait_timeout(locator.to_string())),
        }
    }

    fn find<'a>(&'a self, locator: Locator<'_>) -> Result<Option<Box<dyn Element + 'a>>> {
        let found = match locator {
            Locator::Css(sel) => self.tab.find_element(sel),
            Locator::XPath(sel) => self.tab.find_element_by_xpath(sel),
        };
        // The devtools protocol reports an absent node as an error; only
        // that case means "not there", anything else is a real failure.
        match found {
            Ok(el) => Ok(Some(Box::new(el) as Box<dyn Element + 'a>)),
            Err(e) if e.downcast_ref::<NoElementFound>().is_some() => Ok(None),
            Err(e) => Err(AppError::render(e)),
        }
    }

    fn find_all<'a>(&'a self, locator: Locator<'_>) -> Result<Vec<Box<dyn Element + 'a>>> {
        let found = match locator {
            Locator::Css(sel) => self.tab.find_elements(sel),
            Locator::XPath(sel) => self.tab.find_elements_by_xpath(sel),
        };
        match found {
            Ok(els) => Ok(els
                .into_iter()
                .map(|el| Box::new(el) as Box<dyn Element + 'a>)
                .collect()),
            Err(e) if e.downcast_ref::<NoElementFound>().is_some() => Ok(Vec::new()),
            Err(e) => Err(AppError::render(e)),
        }
    }

    fn source(&self) -> Result<String> {
        self.tab.get_content().map_err(AppError::render)
    }

    fn title(&self) -> Result<String> {
        self.tab.get_title().map_err(AppError::render)
    }
}

impl Element for ChromeElement<'_> {
    fn text(&self) -> Result<String> {
        self.get_inner_text().map_err(AppError::render)
    }

    fn attr(&self, name: &str) -> Result<Option<String>> {
        // get_attributes returns a flat [name, value, name, value, ...] list
        let attrs = self.get_attributes().map_err(AppError::render)?;
        Ok(attrs.and_then(|pairs| {
            pairs
                .chunks_exact(2)
                .find(|pair| pair[0] == name)
                .map(|pair| pair[1].clone())
        }))
    }

    fn click(&self) -> Result<()> {
        ChromeElement::click(self).map_err(AppError::render)?;
        Ok(())
    }
}
