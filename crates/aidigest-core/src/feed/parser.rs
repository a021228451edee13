use chrono::{DateTime, Utc};
use feed_rs::parser;

use super::models::Entry;
use crate::text::{collapse_whitespace, html_to_text};
use crate::{Error, Result};

/// Parsed feed data from RSS/Atom content
#[derive(Debug, Clone)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<Entry>,
}

/// Parse RSS/Atom feed content into entries.
/// Entries without a link are dropped since the link is their identity.
pub fn parse_feed(content: &[u8]) -> Result<ParsedFeed> {
    let feed = parser::parse(content)
        .map_err(|e| Error::FeedParse(e.to_string()))?;

    let title = feed.title
        .map(|t| collapse_whitespace(&t.content))
        .filter(|t| !t.is_empty());

    let entries = feed.entries.into_iter().filter_map(|entry| {
        let link = entry.links.first()
            .map(|l| l.href.trim().to_string())
            .filter(|href| !href.is_empty());

        let Some(link) = link else {
            tracing::debug!("Skipping entry {} without link", entry.id);
            return None;
        };

        // Left empty when missing; the keyword filter treats empty text as a match
        let title = entry.title
            .map(|t| html_to_text(&t.content))
            .unwrap_or_default();

        let fallback_summary = entry.summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .map(|html| html_to_text(&html))
            .unwrap_or_default();

        let published_at = entry.published
            .or(entry.updated)
            .map(|dt| DateTime::<Utc>::from(dt));

        Some(Entry {
            link,
            title,
            published_at,
            fallback_summary,
        })
    }).collect();

    Ok(ParsedFeed { title, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>AI News</title>
    <link>https://news.example.com</link>
    <description>Daily AI news</description>
    <item>
      <title>New LLM released</title>
      <link>https://news.example.com/llm</link>
      <description>&lt;p&gt;A &lt;b&gt;large&lt;/b&gt; model.&lt;/p&gt;</description>
      <pubDate>Sat, 17 Oct 2026 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>No link here</title>
      <description>Orphan</description>
    </item>
    <item>
      <link>https://news.example.com/untitled</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_rss_entries() {
        let parsed = parse_feed(RSS.as_bytes()).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("AI News"));
        assert_eq!(parsed.entries.len(), 2);

        let first = &parsed.entries[0];
        assert_eq!(first.link, "https://news.example.com/llm");
        assert_eq!(first.title, "New LLM released");
        assert_eq!(first.fallback_summary, "A large model.");
        assert_eq!(
            first.published_at,
            Some(Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap())
        );

        let second = &parsed.entries[1];
        assert_eq!(second.title, "");
        assert_eq!(second.published_at, None);
        assert_eq!(second.fallback_summary, "");
    }

    #[test]
    fn test_parse_atom_uses_updated() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Lab Blog</title>
  <id>urn:lab</id>
  <updated>2026-10-18T01:00:00Z</updated>
  <entry>
    <title>Diffusion update</title>
    <id>urn:lab:1</id>
    <link href="https://lab.example.com/diffusion"/>
    <updated>2026-10-18T01:00:00Z</updated>
    <content type="html">&lt;p&gt;Details&lt;/p&gt;</content>
  </entry>
</feed>"#;
        let parsed = parse_feed(atom.as_bytes()).unwrap();
        let entry = &parsed.entries[0];
        assert_eq!(entry.link, "https://lab.example.com/diffusion");
        assert_eq!(
            entry.published_at,
            Some(Utc.with_ymd_and_hms(2026, 10, 18, 1, 0, 0).unwrap())
        );
        assert_eq!(entry.fallback_summary, "Details");
    }

    #[test]
    fn test_parse_garbage_fails() {
        let err = parse_feed(b"<html><body>not a feed</body></html>");
        assert!(matches!(err, Err(Error::FeedParse(_))));
    }
}
