pub mod browser;
pub mod client;
pub mod crawl;
pub mod error;
mod html;
pub mod listing;
pub mod pages;
pub mod resolve;
pub mod wait;

pub use browser::{BrowserSession, WebDriverSession};
pub use client::SiteClient;
pub use crawl::{CrawlContext, CrawlEvent, count_catalog, crawl_and_persist, crawl_catalog, listing_pages};
pub use error::{BrowserError, CrawlError, ResolveError};
pub use listing::ListingItem;
pub use resolve::{DetailResolver, DetailSelectors, Resolution};
pub use wait::WaitPolicy;
pub use tokio_util::sync::CancellationToken;
