//! Pagination discovery.
//!
//! The listing site renders a truncated page range like
//! `1 2 3 … 57`. The link labelled with the ellipsis points at
//! `{root}/page/57/`, and the second-to-last path segment of that link is
//! the number of the last page.

use scraper::Html;
use url::Url;

use crate::client::SiteClient;
use crate::error::CrawlError;
use crate::html::{absolutize, element_text, parse_selector};

const ELLIPSIS_MARKERS: &[&str] = &["...", "\u{2026}"];

/// Fetch the root listing page and return the last page number, or 0 for a
/// site with a single page.
pub async fn discover_last_page(
    client: &SiteClient,
    root: &Url,
    pagination_selector: &str,
) -> Result<u32, CrawlError> {
    let body = client.fetch_page(root).await?;
    let last = last_page_from_html(&body, root, pagination_selector)?;
    log::debug!("Pagination for {}: last page {}", root, last);
    Ok(last)
}

/// Scan the pagination control for the ellipsis link and parse its page
/// number. Returns 0 when there is no control or no such link.
pub fn last_page_from_html(
    html: &str,
    base: &Url,
    pagination_selector: &str,
) -> Result<u32, CrawlError> {
    let container = parse_selector(pagination_selector)?;
    let anchor = parse_selector("a[href]")?;
    let doc = Html::parse_document(html);

    for control in doc.select(&container) {
        for link in control.select(&anchor) {
            let label = element_text(&link);
            if !ELLIPSIS_MARKERS.iter().any(|m| label.contains(m)) {
                continue;
            }
            let Some(url) = link.value().attr("href").and_then(|h| absolutize(base, h)) else {
                continue;
            };
            if let Some(n) = second_to_last_segment(url.path()).and_then(|s| s.parse().ok()) {
                return Ok(n);
            }
        }
    }

    Ok(0)
}

/// `"/roms/gameboy/page/57/"` -> `"57"`. The trailing slash produces an
/// empty last segment, which is why the page number sits second-to-last.
fn second_to_last_segment(path: &str) -> Option<&str> {
    let segments: Vec<&str> = path.split('/').collect();
    segments.len().checked_sub(2).map(|i| segments[i])
}

/// URLs of every listing page: the root itself, then
/// `{root}/{page_segment}/{n}/` for `n` in `2..=last`.
pub fn page_urls(root: &Url, page_segment: &str, last: u32) -> Result<Vec<Url>, CrawlError> {
    let mut urls = vec![root.clone()];
    let base = root.as_str().trim_end_matches('/');
    for n in 2..=last {
        urls.push(Url::parse(&format!("{base}/{page_segment}/{n}/"))?);
    }
    Ok(urls)
}

#[cfg(test)]
#[path = "tests/pages_tests.rs"]
mod tests;
