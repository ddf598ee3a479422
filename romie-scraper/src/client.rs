use reqwest::StatusCode;
use tokio::time::Duration;
use url::Url;

use crate::error::CrawlError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the listing site's plain (non-scripted) pages.
///
/// Only a `200 OK` counts as success; any other status is a [`CrawlError`]
/// because a missing listing page makes the whole crawl untrustworthy.
#[derive(Debug, Clone)]
pub struct SiteClient {
    http: reqwest::Client,
}

impl SiteClient {
    pub fn new(user_agent: &str) -> Result<Self, CrawlError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch a page and return its body.
    pub async fn fetch_page(&self, url: &Url) -> Result<String, CrawlError> {
        log::debug!("GET {}", url);
        let resp = self.http.get(url.clone()).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }
}
