mod extractor;
mod truncate;

pub use extractor::{extract_from_html, SummaryExtractor};
pub use truncate::truncate_at_sentence;
