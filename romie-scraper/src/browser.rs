//! Browser automation used to resolve detail pages.
//!
//! Detail pages only reveal the real download link after a scripted
//! interaction, so they are driven through a WebDriver session rather than
//! fetched with plain HTTP. [`BrowserSession`] is the narrow set of
//! primitives the resolver needs; [`WebDriverSession`] implements it on top
//! of `fantoccini`.
//!
//! A session is driven by one navigation at a time. Methods take
//! `&mut self` so a session cannot be shared across concurrent resolutions.

use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use romie_core::settings::BrowserSettings;

use crate::error::BrowserError;

#[allow(async_fn_in_trait)]
pub trait BrowserSession {
    /// Navigate to a URL and wait for the document to load.
    async fn goto(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Text of the first element matching `selector`, or `None` if no
    /// element matches right now.
    async fn text_of(&mut self, selector: &str) -> Result<Option<String>, BrowserError>;

    /// Value of attribute `name` on the first element matching `selector`.
    /// `None` if the element or the attribute is missing.
    async fn attribute_of(
        &mut self,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, BrowserError>;

    /// Click the first element matching `selector`.
    async fn click(&mut self, selector: &str) -> Result<(), BrowserError>;

    /// Full markup of the current page.
    async fn page_source(&mut self) -> Result<String, BrowserError>;
}

/// WebDriver-backed session (chromedriver, geckodriver, selenium).
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Start a new session against the configured WebDriver endpoint.
    pub async fn connect(settings: &BrowserSettings) -> Result<Self, BrowserError> {
        let mut caps = serde_json::Map::new();
        if settings.headless {
            caps.insert(
                "goog:chromeOptions".to_string(),
                serde_json::json!({ "args": ["--headless=new", "--disable-gpu"] }),
            );
            caps.insert(
                "moz:firefoxOptions".to_string(),
                serde_json::json!({ "args": ["-headless"] }),
            );
        }

        let mut builder =
            ClientBuilder::rustls().map_err(|e| BrowserError::Connect(e.to_string()))?;
        builder.capabilities(caps);
        let client = builder
            .connect(&settings.webdriver_url)
            .await
            .map_err(|e| BrowserError::Connect(format!("{}: {e}", settings.webdriver_url)))?;

        log::debug!("WebDriver session started at {}", settings.webdriver_url);
        Ok(Self { client })
    }

    /// End the WebDriver session.
    pub async fn close(self) -> Result<(), BrowserError> {
        self.client.close().await?;
        Ok(())
    }

    async fn find(&self, selector: &str) -> Result<Option<fantoccini::elements::Element>, BrowserError> {
        missing_as_none(self.client.find(Locator::Css(selector)).await)
    }
}

/// A "no such element" reply means the element is not there yet.
fn missing_as_none<T>(result: Result<T, CmdError>) -> Result<Option<T>, BrowserError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_no_such_element() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl BrowserSession for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<(), BrowserError> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn text_of(&mut self, selector: &str) -> Result<Option<String>, BrowserError> {
        match self.find(selector).await? {
            Some(el) => Ok(Some(el.text().await?)),
            None => Ok(None),
        }
    }

    async fn attribute_of(
        &mut self,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        match self.find(selector).await? {
            Some(el) => Ok(el.attr(name).await?),
            None => Ok(None),
        }
    }

    async fn click(&mut self, selector: &str) -> Result<(), BrowserError> {
        let el = self
            .find(selector)
            .await?
            .ok_or_else(|| BrowserError::ElementNotFound(selector.to_string()))?;
        el.click().await?;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, BrowserError> {
        Ok(self.client.source().await?)
    }
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
