//! Detail page resolution.
//!
//! The real download link is prepared server-side after the visitor
//! triggers the page's download action. One attempt:
//!
//! 1. navigate to the detail page and wait for its description to appear
//! 2. read the cover image link from the markup
//! 3. click the "prepare download" control
//! 4. poll until the download frame gets a `src` or the hidden anchor shows
//!    up in the markup
//! 5. read the notification text and the frame `src`
//! 6. without a frame `src`, scan the markup for the hidden anchor
//!
//! An attempt that ends without a link fails. Failed attempts are retried
//! immediately up to `max_attempts`; after that the resolution carries the
//! last error and whatever was collected so far.

use romie_core::settings::{BrowserSettings, SiteSettings};
use scraper::Html;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::browser::BrowserSession;
use crate::error::ResolveError;
use crate::html::{absolutize, parse_selector};
use crate::wait::WaitPolicy;

/// Outcome of resolving one detail page.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Download link; empty if every attempt failed.
    pub download_link: String,
    pub image_link: String,
    pub notification: Option<String>,
    pub attempts: u32,
    /// Error of the last failed attempt, `None` on success.
    pub error: Option<ResolveError>,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        self.error.is_none() && !self.download_link.is_empty()
    }
}

/// Page locations the resolver works with.
#[derive(Debug, Clone)]
pub struct DetailSelectors {
    pub description: String,
    pub prepare_download: String,
    pub notification: String,
    pub download_frame: String,
    pub cover_image: String,
    pub hidden_anchor_marker: String,
    pub link_start: String,
    pub link_end: String,
}

impl From<&SiteSettings> for DetailSelectors {
    fn from(site: &SiteSettings) -> Self {
        Self {
            description: site.description_selector.clone(),
            prepare_download: site.prepare_download_selector.clone(),
            notification: site.notification_selector.clone(),
            download_frame: site.download_frame_selector.clone(),
            cover_image: site.cover_image_selector.clone(),
            hidden_anchor_marker: site.hidden_anchor_marker.clone(),
            link_start: site.link_start_delimiter.clone(),
            link_end: site.link_end_delimiter.clone(),
        }
    }
}

/// Drives a [`BrowserSession`] through detail pages, one at a time.
pub struct DetailResolver<S> {
    session: S,
    selectors: DetailSelectors,
    wait: WaitPolicy,
    max_attempts: u32,
}

impl<S: BrowserSession> DetailResolver<S> {
    pub fn new(session: S, selectors: DetailSelectors, wait: WaitPolicy, max_attempts: u32) -> Self {
        Self {
            session,
            selectors,
            wait,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_settings(
        session: S,
        site: &SiteSettings,
        browser: &BrowserSettings,
        cancel: CancellationToken,
    ) -> Self {
        let wait = WaitPolicy::new(browser.poll_interval(), browser.wait_timeout(), cancel);
        Self::new(session, DetailSelectors::from(site), wait, browser.max_attempts)
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.wait.cancel
    }

    /// Give the session back, e.g. to close it.
    pub fn into_session(self) -> S {
        self.session
    }

    /// Resolve one listing link, retrying failed attempts immediately.
    pub async fn resolve(&mut self, listing_link: &str) -> Resolution {
        let mut resolution = Resolution::default();

        for attempt in 1..=self.max_attempts {
            resolution.attempts = attempt;
            match self.attempt(listing_link, &mut resolution).await {
                Ok(()) => {
                    resolution.error = None;
                    return resolution;
                }
                Err(ResolveError::Cancelled) => {
                    resolution.error = Some(ResolveError::Cancelled);
                    return resolution;
                }
                Err(e) => {
                    log::debug!(
                        "Attempt {}/{} for {} failed: {}",
                        attempt,
                        self.max_attempts,
                        listing_link,
                        e
                    );
                    resolution.error = Some(e);
                }
            }
        }

        resolution
    }

    async fn attempt(&mut self, url: &str, out: &mut Resolution) -> Result<(), ResolveError> {
        self.session.goto(url).await?;

        let deadline = self.wait.start(&self.selectors.description);
        while self.session.text_of(&self.selectors.description).await?.is_none() {
            deadline.tick().await?;
        }

        let markup = self.session.page_source().await?;
        if let Some(image) = cover_image_link(&markup, url, &self.selectors.cover_image) {
            out.image_link = image;
        }

        self.session.click(&self.selectors.prepare_download).await?;

        let frame_src = self.wait_for_download_link().await?;

        out.notification = self
            .session
            .text_of(&self.selectors.notification)
            .await?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let link = match frame_src {
            Some(src) => src,
            None => {
                let markup = self.session.page_source().await?;
                self.hidden_link_in(&markup).unwrap_or_default()
            }
        };

        if link.is_empty() {
            return Err(ResolveError::NoDownloadLink);
        }
        out.download_link = link;
        Ok(())
    }

    fn hidden_link_in(&self, markup: &str) -> Option<String> {
        extract_hidden_link(
            markup,
            &self.selectors.hidden_anchor_marker,
            &self.selectors.link_start,
            &self.selectors.link_end,
        )
    }

    /// Poll until the frame carries a `src` or the hidden anchor appears.
    /// Returns the frame `src` if there is one. Running out of time is not
    /// an error here; the markup fallback still gets its chance.
    async fn wait_for_download_link(&mut self) -> Result<Option<String>, ResolveError> {
        let deadline = self.wait.start("download link");
        loop {
            if let Some(src) = frame_src(&mut self.session, &self.selectors.download_frame).await? {
                return Ok(Some(src));
            }
            let markup = self.session.page_source().await?;
            if self.hidden_link_in(&markup).is_some() {
                return Ok(None);
            }
            match deadline.tick().await {
                Ok(()) => {}
                Err(ResolveError::Timeout { waited_ms, .. }) => {
                    log::debug!("No download frame after {}ms, trying markup fallback", waited_ms);
                    return Ok(None);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

async fn frame_src<S: BrowserSession>(
    session: &mut S,
    selector: &str,
) -> Result<Option<String>, ResolveError> {
    Ok(session
        .attribute_of(selector, "src")
        .await?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Find the first tag containing `marker` (e.g. `display:none`) and return
/// the text between `start` and `end` inside that tag.
pub fn extract_hidden_link(markup: &str, marker: &str, start: &str, end: &str) -> Option<String> {
    if marker.is_empty() || start.is_empty() || end.is_empty() {
        return None;
    }

    let mut from = 0;
    while let Some(pos) = markup[from..].find(marker) {
        let marker_at = from + pos;
        from = marker_at + marker.len();

        let Some(tag_start) = markup[..marker_at].rfind('<') else {
            continue;
        };
        let Some(tag_len) = markup[tag_start..].find('>') else {
            break;
        };
        let tag = &markup[tag_start..tag_start + tag_len];
        if !is_anchor_tag(tag) {
            continue;
        }
        if let Some(link) = attribute_value(tag, start, end).filter(|l| !l.is_empty()) {
            return Some(link.to_string());
        }
    }

    None
}

/// `<a` followed by whitespace or the end of the tag, so `<aside>`,
/// `<abbr>` and friends don't count.
fn is_anchor_tag(tag: &str) -> bool {
    tag.strip_prefix("<a")
        .is_some_and(|rest| rest.chars().next().is_none_or(|c| c.is_whitespace() || c == '/'))
}

/// Text between `start` and `end`, where `start` must begin a new attribute
/// (preceded by whitespace). `data-href="` does not match `href="`.
fn attribute_value<'a>(tag: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let mut from = 0;
    while let Some(pos) = tag[from..].find(start) {
        let at = from + pos;
        from = at + start.len();
        if !tag[..at].ends_with(char::is_whitespace) {
            continue;
        }
        let len = tag[from..].find(end)?;
        return Some(tag[from..from + len].trim());
    }
    None
}

/// Absolute `src` of the cover image on a detail page.
pub fn cover_image_link(markup: &str, page_url: &str, selector: &str) -> Option<String> {
    let selector = parse_selector(selector).ok()?;
    let doc = Html::parse_document(markup);
    let img = doc.select(&selector).next()?;
    let src = img
        .value()
        .attr("src")
        .or_else(|| img.value().attr("data-src"))?;
    match Url::parse(page_url) {
        Ok(base) => absolutize(&base, src).map(|u| u.to_string()),
        Err(_) => Some(src.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
