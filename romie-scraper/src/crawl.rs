//! The crawl pipeline: pages -> listings -> detail resolution -> catalog.
//!
//! Everything here runs sequentially. The browser session behind the
//! resolver handles one navigation at a time, so there is nothing to gain
//! from overlapping detail pages.

use std::path::Path;

use romie_core::catalog;
use romie_core::settings::SiteSettings;
use romie_core::{Catalog, CatalogEntry};
use tokio::sync::mpsc;
use url::Url;

use crate::browser::BrowserSession;
use crate::client::SiteClient;
use crate::error::CrawlError;
use crate::listing;
use crate::pages;
use crate::resolve::DetailResolver;

/// Progress events emitted during a crawl, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum CrawlEvent {
    /// Fetching the root page to discover pagination.
    Indexing,
    /// Pagination discovered.
    PagesDiscovered { pages: usize },
    /// A page was counted during a counting pass.
    PageCounted { page: usize, count: usize },
    /// Listing page fetched and parsed.
    PageStarted { page: usize, items: usize },
    /// A detail page is being resolved.
    EntryStarted { index: usize, title: String },
    /// Download link resolved.
    EntryResolved {
        index: usize,
        title: String,
        attempts: u32,
    },
    /// Resolution failed; the entry is kept with an empty link.
    EntryDegraded {
        index: usize,
        title: String,
        reason: String,
    },
    /// All pages crawled.
    Done { entries: usize, degraded: usize },
}

/// Running state of one crawl, owned by the pipeline driver.
#[derive(Debug, Default)]
pub struct CrawlContext {
    pub catalog: Catalog,
    pub pages_done: usize,
    pub degraded: usize,
}

impl CrawlContext {
    pub fn new(expected: usize) -> Self {
        Self {
            catalog: Catalog::with_capacity(expected),
            ..Self::default()
        }
    }

    /// Index the next entry will get.
    pub fn next_index(&self) -> usize {
        self.catalog.len()
    }
}

/// Discover the listing pages under the configured root.
pub async fn listing_pages(
    client: &SiteClient,
    site: &SiteSettings,
) -> Result<Vec<Url>, CrawlError> {
    let root = Url::parse(&site.root_url)?;
    let last = pages::discover_last_page(client, &root, &site.pagination_selector).await?;
    pages::page_urls(&root, &site.page_segment, last)
}

/// Count every listing on every page without resolving anything.
pub async fn count_catalog(
    client: &SiteClient,
    site: &SiteSettings,
    events: &mpsc::UnboundedSender<CrawlEvent>,
) -> Result<usize, CrawlError> {
    let _ = events.send(CrawlEvent::Indexing);
    let urls = listing_pages(client, site).await?;
    let _ = events.send(CrawlEvent::PagesDiscovered { pages: urls.len() });

    let mut total = 0;
    for (i, url) in urls.iter().enumerate() {
        let count = listing::count_listing(client, url, &site.listing_selector).await?;
        let _ = events.send(CrawlEvent::PageCounted { page: i + 1, count });
        total += count;
    }

    log::debug!("Counted {} listings across {} pages", total, urls.len());
    Ok(total)
}

/// Crawl every listing page, resolve each entry and build the catalog.
///
/// Fails if any listing page cannot be fetched, or if the number of
/// entries differs from `expected`. Per-entry resolution failures only
/// degrade that entry.
pub async fn crawl_catalog<S: BrowserSession>(
    client: &SiteClient,
    resolver: &mut DetailResolver<S>,
    site: &SiteSettings,
    expected: usize,
    events: &mpsc::UnboundedSender<CrawlEvent>,
) -> Result<Catalog, CrawlError> {
    let _ = events.send(CrawlEvent::Indexing);
    let urls = listing_pages(client, site).await?;
    let _ = events.send(CrawlEvent::PagesDiscovered { pages: urls.len() });

    let mut ctx = CrawlContext::new(expected);

    for (i, url) in urls.iter().enumerate() {
        let items = listing::scrape_listing(client, url, &site.listing_selector).await?;
        let _ = events.send(CrawlEvent::PageStarted {
            page: i + 1,
            items: items.len(),
        });

        for item in items {
            if resolver.cancel_token().is_cancelled() {
                return Err(CrawlError::Cancelled);
            }

            let index = ctx.next_index();
            let _ = events.send(CrawlEvent::EntryStarted {
                index,
                title: item.title.clone(),
            });

            let resolution = resolver.resolve(&item.link).await;
            match &resolution.error {
                None => {
                    let _ = events.send(CrawlEvent::EntryResolved {
                        index,
                        title: item.title.clone(),
                        attempts: resolution.attempts,
                    });
                }
                Some(e) => {
                    log::warn!(
                        "Could not resolve '{}' after {} attempt(s): {}",
                        item.title,
                        resolution.attempts,
                        e
                    );
                    ctx.degraded += 1;
                    let _ = events.send(CrawlEvent::EntryDegraded {
                        index,
                        title: item.title.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            let download_link = if resolution.error.is_none() {
                resolution.download_link
            } else {
                String::new()
            };
            ctx.catalog.push(CatalogEntry::from_resolved(
                item.title,
                item.link,
                download_link,
                resolution.image_link,
            ));
        }

        ctx.pages_done += 1;
    }

    let _ = events.send(CrawlEvent::Done {
        entries: ctx.catalog.len(),
        degraded: ctx.degraded,
    });

    ctx.catalog.verify_count(expected)?;
    Ok(ctx.catalog)
}

/// Crawl, verify the entry count, then persist the catalog to `path`.
/// Nothing is written unless the crawl completes and the count matches.
pub async fn crawl_and_persist<S: BrowserSession>(
    client: &SiteClient,
    resolver: &mut DetailResolver<S>,
    site: &SiteSettings,
    expected: usize,
    path: &Path,
    events: &mpsc::UnboundedSender<CrawlEvent>,
) -> Result<Catalog, CrawlError> {
    let catalog = crawl_catalog(client, resolver, site, expected, events).await?;
    catalog::persist(path, &catalog)?;
    log::info!("Wrote {} entries to {}", catalog.len(), path.display());
    Ok(catalog)
}
