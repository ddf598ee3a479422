//! Small helpers around `scraper` shared by the page parsers.

use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::CrawlError;

pub(crate) fn parse_selector(css: &str) -> Result<Selector, CrawlError> {
    Selector::parse(css).map_err(|_| CrawlError::Selector(css.to_string()))
}

/// Visible text of an element with whitespace runs collapsed.
pub(crate) fn element_text(el: &ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve an `href`/`src` value against the page it came from.
pub(crate) fn absolutize(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok()
}
