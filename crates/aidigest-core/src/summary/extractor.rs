use reqwest::Client;
use scraper::{Html, Selector};

use super::truncate::truncate_at_sentence;
use crate::config::AppConfig;
use crate::feed::{build_client, build_headers, next_user_agent};
use crate::text::collapse_whitespace;
use crate::{Error, Result};

/// Article pages larger than this are not parsed
const MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;

/// Pulls a short summary out of an article page.
///
/// Every failure (network, HTTP status, body decode) falls back to the
/// feed-provided text; `summarize` never returns an error.
pub struct SummaryExtractor {
    client: Client,
    enabled: bool,
    min_paragraph_chars: usize,
    max_chars: usize,
}

impl SummaryExtractor {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = build_client(
            config.summary.request_timeout_secs,
            &config.sync.proxy_url,
        )?;

        Ok(Self {
            client,
            enabled: config.summary.enabled,
            min_paragraph_chars: config.summary.min_paragraph_chars,
            max_chars: config.summary.max_chars,
        })
    }

    /// Summary for the article at `url`, truncated to a sentence boundary.
    /// Returns `None` when neither the page nor the fallback has any text.
    pub async fn summarize(&self, url: &str, fallback: &str) -> Option<String> {
        let text = if self.enabled {
            self.extract(url, fallback).await
        } else {
            fallback.to_string()
        };

        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(truncate_at_sentence(text, self.max_chars))
    }

    /// First long paragraph or meta description of the page, else `fallback`
    pub async fn extract(&self, url: &str, fallback: &str) -> String {
        match self.fetch_page(url).await {
            Ok(Some(text)) => text,
            Ok(None) => fallback.to_string(),
            Err(e) => {
                tracing::debug!("Summary fetch failed for {}: {}", url, e);
                fallback.to_string()
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<Option<String>> {
        let mut response = self.client
            .get(url)
            .headers(build_headers(next_user_agent()))
            .send()
            .await?
            .error_for_status()?;

        let too_large = || Error::TooLarge { url: url.to_string(), limit: MAX_PAGE_BYTES };
        if response.content_length().is_some_and(|len| len > MAX_PAGE_BYTES as u64) {
            return Err(too_large());
        }

        // Content-Length is optional; cap the streamed body too
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > MAX_PAGE_BYTES {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        let html = String::from_utf8_lossy(&body);
        Ok(extract_from_html(&html, self.min_paragraph_chars))
    }
}

/// Find the first `<p>` with at least `min_chars` characters of text, else
/// the non-empty `<meta name="description">` content
pub fn extract_from_html(html: &str, min_chars: usize) -> Option<String> {
    let document = Html::parse_document(html);

    let p_selector = Selector::parse("p").ok()?;
    let paragraph = document
        .select(&p_selector)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .find(|text| text.chars().count() >= min_chars);

    if paragraph.is_some() {
        return paragraph;
    }

    let meta_selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
    document
        .select(&meta_selector)
        .filter_map(|m| m.value().attr("content"))
        .map(collapse_whitespace)
        .find(|content| !content.is_empty())
}
