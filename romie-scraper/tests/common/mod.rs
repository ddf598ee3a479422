//! Scripted stand-in for a WebDriver session.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use romie_core::settings::SiteSettings;
use romie_scraper::{BrowserError, BrowserSession, CancellationToken, DetailResolver, DetailSelectors, WaitPolicy};

/// How one detail page behaves.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    /// Description polls that come back empty before it appears.
    pub description_after: u32,
    pub no_description: bool,
    pub cover: Option<String>,
    /// Frame `src` set once the download control is clicked.
    pub frame_src: Option<String>,
    /// Frame polls after the click that come back empty.
    pub frame_after: u32,
    /// Hidden anchor injected into the markup after the click.
    pub hidden_link: Option<String>,
    pub notification: Option<String>,
    /// Number of navigations to this page that fail outright.
    pub goto_failures: u32,
}

impl FakePage {
    pub fn with_frame(src: &str) -> Self {
        Self {
            frame_src: Some(src.to_string()),
            cover: Some("/covers/cover.jpg".to_string()),
            ..Self::default()
        }
    }
}

pub struct FakeBrowser {
    site: SiteSettings,
    pages: HashMap<String, FakePage>,
    current: Option<String>,
    clicked: bool,
    description_polls: u32,
    frame_polls: u32,
    pub visits: Vec<String>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self {
            site: SiteSettings::default(),
            pages: HashMap::new(),
            current: None,
            clicked: false,
            description_polls: 0,
            frame_polls: 0,
            visits: Vec::new(),
        }
    }

    pub fn page(mut self, url: impl Into<String>, page: FakePage) -> Self {
        self.pages.insert(url.into(), page);
        self
    }

    fn current_page(&self) -> Option<&FakePage> {
        self.current.as_ref().and_then(|u| self.pages.get(u))
    }
}

impl BrowserSession for FakeBrowser {
    async fn goto(&mut self, url: &str) -> Result<(), BrowserError> {
        self.visits.push(url.to_string());
        self.clicked = false;
        self.description_polls = 0;
        self.frame_polls = 0;
        self.current = Some(url.to_string());
        if let Some(page) = self.pages.get_mut(url) {
            if page.goto_failures > 0 {
                page.goto_failures -= 1;
                return Err(BrowserError::Other("connection reset".to_string()));
            }
        }
        Ok(())
    }

    async fn text_of(&mut self, selector: &str) -> Result<Option<String>, BrowserError> {
        if selector == self.site.description_selector {
            let Some(page) = self.current_page().cloned() else {
                return Ok(None);
            };
            if page.no_description {
                return Ok(None);
            }
            if self.description_polls < page.description_after {
                self.description_polls += 1;
                return Ok(None);
            }
            return Ok(Some("A classic Game Boy title.".to_string()));
        }
        if selector == self.site.notification_selector && self.clicked {
            return Ok(self.current_page().and_then(|p| p.notification.clone()));
        }
        Ok(None)
    }

    async fn attribute_of(
        &mut self,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        if selector != self.site.download_frame_selector || name != "src" || !self.clicked {
            return Ok(None);
        }
        let Some(page) = self.current_page().cloned() else {
            return Ok(None);
        };
        if self.frame_polls < page.frame_after {
            self.frame_polls += 1;
            return Ok(None);
        }
        Ok(page.frame_src)
    }

    async fn click(&mut self, selector: &str) -> Result<(), BrowserError> {
        if selector != self.site.prepare_download_selector {
            return Err(BrowserError::ElementNotFound(selector.to_string()));
        }
        self.clicked = true;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, BrowserError> {
        let mut html = String::from("<html><body><div class=\"game-description\">ok</div>");
        if let Some(page) = self.current_page() {
            if let Some(cover) = &page.cover {
                html.push_str(&format!("<div class=\"game-cover\"><img src=\"{cover}\"></div>"));
            }
            if self.clicked {
                if let Some(link) = &page.hidden_link {
                    html.push_str(&format!("<a style=\"display:none\" href=\"{link}\">dl</a>"));
                }
            }
        }
        html.push_str("</body></html>");
        Ok(html)
    }
}

pub fn fast_wait(cancel: CancellationToken) -> WaitPolicy {
    WaitPolicy::new(Duration::from_millis(1), Duration::from_millis(40), cancel)
}

pub fn resolver(browser: FakeBrowser, max_attempts: u32) -> DetailResolver<FakeBrowser> {
    DetailResolver::new(
        browser,
        DetailSelectors::from(&SiteSettings::default()),
        fast_wait(CancellationToken::new()),
        max_attempts,
    )
}
