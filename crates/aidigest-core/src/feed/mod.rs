mod fetcher;
mod models;
mod parser;

pub use fetcher::{next_user_agent, FeedFetcher};
pub(crate) use fetcher::{build_client, build_headers};
pub use models::{Entry, UNTITLED};
pub use parser::{parse_feed, ParsedFeed};
