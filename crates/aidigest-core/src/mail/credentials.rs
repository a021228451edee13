use std::fmt;

use crate::{Error, Result};

pub const ENV_EMAIL_USER: &str = "EMAIL_USER";
pub const ENV_EMAIL_PASS: &str = "EMAIL_PASS";
pub const ENV_RECIPIENT: &str = "RECIPIENT";

/// SMTP login and recipient, taken from the environment
#[derive(Clone)]
pub struct MailCredentials {
    /// Sender address, also the SMTP username
    pub user: String,
    /// SMTP password (for Gmail, an app password)
    pub password: String,
    pub recipient: String,
}

impl MailCredentials {
    /// Read EMAIL_USER, EMAIL_PASS and RECIPIENT
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from any key lookup.
    /// Every missing or blank variable is reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut get = |key: &'static str| {
            let value = lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };

        let user = get(ENV_EMAIL_USER);
        let password = get(ENV_EMAIL_PASS);
        let recipient = get(ENV_RECIPIENT);

        if !missing.is_empty() {
            return Err(Error::MissingCredentials(missing));
        }

        Ok(Self {
            user,
            password,
            recipient,
        })
    }
}

impl fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .field("recipient", &self.recipient)
            .finish()
    }
}
