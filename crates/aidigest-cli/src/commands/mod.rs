pub mod aggregate;
pub mod feeds;
pub mod mail;
