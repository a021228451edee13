use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::{Client, Proxy};
use url::Url;

use super::parser::{parse_feed, ParsedFeed};
use crate::config::AppConfig;
use crate::{Error, Result};

const MAX_FEED_BYTES: usize = 5 * 1024 * 1024;

// Rotating User-Agent pool - some publishers reject non-browser clients
static USER_AGENT_INDEX: AtomicUsize = AtomicUsize::new(0);
const USER_AGENTS: &[&str] = &[
    // Chrome on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Firefox on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Get the next User-Agent in rotation
pub fn next_user_agent() -> &'static str {
    let index = USER_AGENT_INDEX.fetch_add(1, Ordering::Relaxed) % USER_AGENTS.len();
    USER_AGENTS[index]
}

/// Build HTTP client with optional proxy
pub(crate) fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(ref proxy) = proxy_url {
        let proxy = Proxy::all(proxy)
            .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
        builder = builder.proxy(proxy);
        tracing::info!("Using HTTP proxy for fetching");
    }

    Ok(builder.build()?)
}

/// Build browser-like headers for a request
pub(crate) fn build_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,application/rss+xml,application/atom+xml,*/*;q=0.8"
        )
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9,zh-CN;q=0.8,zh;q=0.7")
    );
    headers.insert(
        REFERER,
        HeaderValue::from_static("https://www.google.com/")
    );
    if let Ok(ua) = HeaderValue::from_str(user_agent) {
        headers.insert(USER_AGENT, ua);
    }
    headers
}

/// Feed fetcher: one GET per feed, no retries
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = build_client(config.sync.request_timeout_secs, &config.sync.proxy_url)?;
        Ok(Self { client })
    }

    /// Fetch and parse a feed from URL
    pub async fn fetch(&self, url: &str) -> Result<ParsedFeed> {
        let content = self.fetch_raw(url).await?;
        parse_feed(&content)
    }

    /// Fetch feed content as raw bytes
    pub async fn fetch_raw(&self, url: &str) -> Result<Bytes> {
        let url = Url::parse(url.trim())?;

        tracing::debug!("Fetching feed from: {}", url);

        let response = self.client
            .get(url.as_str())
            .headers(build_headers(next_user_agent()))
            .send()
            .await?;

        let status = response.status();
        let is_cloudflare = response.headers().get("cf-mitigated").is_some()
            || response
                .headers()
                .get("server")
                .map(|v| v.to_str().unwrap_or("").contains("cloudflare"))
                .unwrap_or(false);

        if status == reqwest::StatusCode::FORBIDDEN && is_cloudflare {
            return Err(Error::FeedParse(format!(
                "Cloudflare protection detected for URL: {}. \
                The site requires JavaScript verification; configure a proxy in [sync] proxy_url.",
                url
            )));
        }

        if !status.is_success() {
            return Err(Error::FeedParse(format!("HTTP {} for URL: {}", status, url)));
        }

        let content = response.bytes().await?;

        if content.len() > MAX_FEED_BYTES {
            return Err(Error::FeedParse(format!(
                "Feed too large ({} bytes) for URL: {}",
                content.len(),
                url
            )));
        }

        if is_cloudflare_challenge(&content) {
            return Err(Error::FeedParse(format!(
                "Cloudflare JavaScript challenge detected for URL: {}",
                url
            )));
        }

        Ok(content)
    }
}

/// Check if content is a Cloudflare challenge page
fn is_cloudflare_challenge(content: &[u8]) -> bool {
    // Markers appear in the first 2KB
    let check_len = content.len().min(2048);
    let preview = String::from_utf8_lossy(&content[..check_len]);

    preview.contains("Just a moment...")
        || preview.contains("cf-browser-verification")
        || preview.contains("_cf_chl_opt")
        || preview.contains("challenge-platform")
}
