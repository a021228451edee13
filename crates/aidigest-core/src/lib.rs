pub mod config;
pub mod digest;
pub mod error;
pub mod feed;
pub mod filter;
pub mod mail;
pub mod pipeline;
pub mod summary;
pub mod text;

pub use config::{AppConfig, FeedConfig};
pub use error::{Error, Result};
pub use pipeline::Aggregator;
