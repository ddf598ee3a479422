use romie_core::CatalogError;

/// Errors from the WebDriver session.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Failed to start WebDriver session: {0}")]
    Connect(String),

    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Browser error: {0}")]
    Other(String),
}

/// Why one attempt at resolving a detail page failed.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("Timed out after {waited_ms}ms waiting for {what}")]
    Timeout { what: String, waited_ms: u128 },

    #[error("Resolution cancelled")]
    Cancelled,

    #[error("No download link found on detail page")]
    NoDownloadLink,
}

/// Errors that abort a crawl. None of these leave a catalog behind.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid CSS selector '{0}'")]
    Selector(String),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Crawl cancelled")]
    Cancelled,
}
