use scraper::Html;
use url::Url;

use crate::client::SiteClient;
use crate::error::CrawlError;
use crate::html::{absolutize, element_text, parse_selector};

/// One game as it appears on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    pub title: String,
    /// Absolute URL of the detail page.
    pub link: String,
}

/// Fetch a listing page and extract its items.
pub async fn scrape_listing(
    client: &SiteClient,
    page: &Url,
    listing_selector: &str,
) -> Result<Vec<ListingItem>, CrawlError> {
    let body = client.fetch_page(page).await?;
    extract_listings(&body, page, listing_selector)
}

/// Fetch a listing page and only count its items.
pub async fn count_listing(
    client: &SiteClient,
    page: &Url,
    listing_selector: &str,
) -> Result<usize, CrawlError> {
    let body = client.fetch_page(page).await?;
    count_on_page(&body, listing_selector)
}

/// Extract `(title, link)` pairs from every listing anchor with an `href`.
/// The title falls back to the anchor's `title` attribute when it has no
/// visible text.
pub fn extract_listings(
    html: &str,
    base: &Url,
    listing_selector: &str,
) -> Result<Vec<ListingItem>, CrawlError> {
    let selector = parse_selector(listing_selector)?;
    let doc = Html::parse_document(html);

    let mut items = Vec::new();
    for anchor in doc.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let link = match absolutize(base, href) {
            Some(url) => url.to_string(),
            None => href.to_string(),
        };
        let mut title = element_text(&anchor);
        if title.is_empty() {
            title = anchor.value().attr("title").unwrap_or_default().trim().to_string();
        }
        items.push(ListingItem { title, link });
    }

    Ok(items)
}

/// Count listing anchors without building items. Used to check a crawl's
/// total before trusting it.
pub fn count_on_page(html: &str, listing_selector: &str) -> Result<usize, CrawlError> {
    let selector = parse_selector(listing_selector)?;
    let doc = Html::parse_document(html);
    Ok(doc
        .select(&selector)
        .filter(|a| a.value().attr("href").is_some())
        .count())
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
