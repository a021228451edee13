use chrono::{DateTime, Utc};

/// Digest title used for entries that carry none
pub const UNTITLED: &str = "(no title)";

/// A raw feed item before filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Article URL; unique key within a run
    pub link: String,
    /// Empty when the feed gives no title
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Plain-text feed summary, used when the article page yields nothing better
    pub fallback_summary: String,
}

impl Entry {
    /// Check if the entry was published before `cutoff`.
    /// Entries without a timestamp are never considered stale.
    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.published_at.map(|at| at < cutoff).unwrap_or(false)
    }
}
