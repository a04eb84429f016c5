use crate::error::ImportError;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::Duration;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGES: &str = "en-US,en;q=0.9,nl;q=0.8,de;q=0.7,fr;q=0.6";

pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ImportError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(10));

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGES));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .redirect(Policy::limited(10))
            .build()
            .map_err(|e| ImportError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// GET the page body. Non-success statuses, timeouts and transport errors
    /// are mapped to their user-facing [`ImportError`] categories.
    pub async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        debug!("Fetching {url}");
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request to {url} failed: {e}");
            ImportError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Request to {url} returned HTTP {status}");
            return Err(ImportError::from_status(status.as_u16()));
        }

        let html = response.text().await?;
        debug!("Fetched {} bytes from {url}", html.len());
        Ok(html)
    }
}
