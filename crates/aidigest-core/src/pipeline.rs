//! The aggregation run: fetch every feed, filter, summarize, write the digest.
//!
//! Feeds and articles are processed strictly one after another.

use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};

use crate::config::{AppConfig, FeedConfig};
use crate::digest::{Digest, DigestItem};
use crate::feed::{FeedFetcher, UNTITLED};
use crate::filter::{KeywordFilter, RecencyFilter, SeenLinks};
use crate::summary::SummaryExtractor;
use crate::Result;

/// Source name used when neither the config nor the feed provides one
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Per-run counters, logged once the run completes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub feeds_fetched: usize,
    pub feeds_failed: usize,
    pub entries_seen: usize,
    pub stale: usize,
    pub duplicate: usize,
    pub off_topic: usize,
    pub kept: usize,
}

pub struct Aggregator {
    fetcher: FeedFetcher,
    extractor: SummaryExtractor,
    keywords: KeywordFilter,
    window_hours: u32,
}

impl Aggregator {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            fetcher: FeedFetcher::new(config)?,
            extractor: SummaryExtractor::new(config)?,
            keywords: KeywordFilter::new(&config.filter.keywords),
            window_hours: config.filter.window_hours,
        })
    }

    /// Collect digest items from `feeds` in encounter order.
    /// Feeds that fail to fetch or parse are logged and skipped.
    pub async fn collect<'a, I>(&self, feeds: I, now: DateTime<Utc>) -> (Vec<DigestItem>, CollectStats)
    where
        I: IntoIterator<Item = &'a FeedConfig>,
    {
        let recency = RecencyFilter::new(now, self.window_hours);
        let mut seen = SeenLinks::new();
        let mut stats = CollectStats::default();
        let mut items = Vec::new();

        for feed in feeds {
            if feed.url.trim().is_empty() {
                continue;
            }

            let parsed = match self.fetcher.fetch(&feed.url).await {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Failed to fetch feed '{}': {}", feed.url, e);
                    stats.feeds_failed += 1;
                    continue;
                }
            };
            stats.feeds_fetched += 1;

            let source = source_name(feed, parsed.title.as_deref());
            let before = items.len();

            for entry in parsed.entries {
                stats.entries_seen += 1;

                if seen.contains(&entry.link) {
                    stats.duplicate += 1;
                    continue;
                }
                if !recency.accepts(&entry) {
                    stats.stale += 1;
                    continue;
                }
                if !self.keywords.matches(&entry.title, &entry.fallback_summary) {
                    tracing::debug!("Skipping off-topic entry '{}'", entry.title);
                    stats.off_topic += 1;
                    continue;
                }
                seen.insert(&entry.link);

                let summary = self.extractor
                    .summarize(&entry.link, &entry.fallback_summary)
                    .await;

                let title = if entry.title.trim().is_empty() {
                    UNTITLED.to_string()
                } else {
                    entry.title
                };

                items.push(DigestItem {
                    source: source.clone(),
                    title,
                    link: entry.link,
                    summary,
                });
            }

            tracing::info!("Feed '{}': {} new items", source, items.len() - before);
        }

        stats.kept = items.len();
        (items, stats)
    }

    /// Run the whole pipeline and write `digest-<date>.md` into the output
    /// directory. Returns `None` without writing when nothing qualified.
    pub async fn run(&self, config: &AppConfig, now: DateTime<Local>) -> Result<Option<PathBuf>> {
        let (items, stats) = self.collect(config.active_feeds(), now.with_timezone(&Utc)).await;

        tracing::info!(
            feeds = stats.feeds_fetched,
            failed = stats.feeds_failed,
            entries = stats.entries_seen,
            stale = stats.stale,
            duplicate = stats.duplicate,
            off_topic = stats.off_topic,
            kept = stats.kept,
            "Aggregation finished"
        );

        if items.is_empty() {
            return Ok(None);
        }

        let digest = Digest::new(now.date_naive(), items);
        let path = digest.write_to(
            &config.output.dir,
            &config.output.title,
            config.filter.window_hours,
        )?;
        Ok(Some(path))
    }
}

fn source_name(feed: &FeedConfig, feed_title: Option<&str>) -> String {
    let name = feed.name.trim();
    if !name.is_empty() {
        return name.to_string();
    }
    feed_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_SOURCE)
        .to_string()
}
