//! Digest assembly, Markdown rendering and the dated output files.

mod models;
mod render;
mod store;

pub use models::{Digest, DigestItem, DigestStats};
pub use render::render_markdown;
pub use store::{digest_file_name, find_latest_digest, DIGEST_PREFIX, DIGEST_SUFFIX};
