use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A filtered, summarized entry included in the digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestItem {
    pub source: String,
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
}

/// Item totals for the statistics block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestStats {
    pub total: usize,
    /// Items per source, in ascending source order
    pub per_source: BTreeMap<String, usize>,
}

impl DigestStats {
    pub fn source_count(&self) -> usize {
        self.per_source.len()
    }
}

/// The report for one run, items ordered by source name
#[derive(Debug, Clone)]
pub struct Digest {
    date: NaiveDate,
    items: Vec<DigestItem>,
}

impl Digest {
    /// Items keep their encounter order within a source (stable sort)
    pub fn new(date: NaiveDate, mut items: Vec<DigestItem>) -> Self {
        items.sort_by(|a, b| a.source.cmp(&b.source));
        Self { date, items }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn items(&self) -> &[DigestItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stats(&self) -> DigestStats {
        let mut per_source = BTreeMap::new();
        for item in &self.items {
            *per_source.entry(item.source.clone()).or_insert(0) += 1;
        }
        DigestStats {
            total: self.items.len(),
            per_source,
        }
    }
}
