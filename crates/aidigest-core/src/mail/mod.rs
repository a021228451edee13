//! Sending the latest digest by email over SMTPS.

mod credentials;
mod html;
mod sender;

pub use credentials::{MailCredentials, ENV_EMAIL_PASS, ENV_EMAIL_USER, ENV_RECIPIENT};
pub use html::{markdown_to_html, render_email_html};
pub use sender::{prepare_latest_digest, Mailer, PreparedEmail};
