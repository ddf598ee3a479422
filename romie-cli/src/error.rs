use thiserror::Error;

use romie_core::{CatalogError, SettingsError};
use romie_download::DownloadError;
use romie_scraper::{BrowserError, CrawlError};

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Crawl failed: {0}")]
    Crawl(#[from] CrawlError),

    #[error("{0}")]
    Browser(#[from] BrowserError),

    #[error("Download setup failed: {0}")]
    Download(#[from] DownloadError),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
