//! Entry filters applied before summary extraction.
//!
//! Recency and link dedup run first, then the keyword allow-list.

mod keywords;
mod recency;

pub use keywords::KeywordFilter;
pub use recency::{RecencyFilter, SeenLinks};
