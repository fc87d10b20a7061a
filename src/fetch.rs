use crate::error::{Result, ScrapeError};
use reqwest::{Client, header};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// A fetched listing page.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub status: u16,
    pub html: String,
}

/// Source of HTML for the extractor. Non-2xx answers are errors.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawPage>;
}

/// Fetches pages over HTTP, dressed up as a desktop browser.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        // Some sites hand out consent/session cookies on the first hit.
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
            timeout,
        })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage> {
        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT, ACCEPT_HTML)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(header::ACCEPT_ENCODING, "gzip, deflate")
            .header(header::CONNECTION, "keep-alive")
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = resp.text().await?;
        Ok(RawPage {
            url: url.to_string(),
            status: status.as_u16(),
            html,
        })
    }
}
