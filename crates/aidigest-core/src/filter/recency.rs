use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::feed::Entry;

/// Trailing time window filter. Entries without a timestamp are kept.
#[derive(Debug, Clone, Copy)]
pub struct RecencyFilter {
    cutoff: DateTime<Utc>,
}

impl RecencyFilter {
    /// Keep entries published within `window_hours` before `now`
    pub fn new(now: DateTime<Utc>, window_hours: u32) -> Self {
        Self {
            cutoff: now - Duration::hours(i64::from(window_hours)),
        }
    }

    pub fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff
    }

    pub fn accepts(&self, entry: &Entry) -> bool {
        !entry.is_older_than(self.cutoff)
    }
}

/// Links already included in the current run
#[derive(Debug, Default)]
pub struct SeenLinks {
    links: HashSet<String>,
}

impl SeenLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    /// Record a link; returns false if it was already present
    pub fn insert(&mut self, link: &str) -> bool {
        self.links.insert(link.to_string())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
