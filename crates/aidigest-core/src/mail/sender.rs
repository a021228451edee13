use std::path::{Path, PathBuf};

use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::credentials::MailCredentials;
use super::html::{markdown_to_html, render_email_html};
use crate::config::MailConfig;
use crate::digest::{find_latest_digest, DIGEST_PREFIX, DIGEST_SUFFIX};
use crate::{Error, Result};

/// The latest digest, rendered and ready to send
#[derive(Debug, Clone)]
pub struct PreparedEmail {
    pub path: PathBuf,
    pub subject: String,
    pub html_body: String,
    /// Raw Markdown, used as the plain-text alternative
    pub text_body: String,
}

/// Locate the latest digest in `dir` and render it as an email.
/// Fails with `DigestNotFound` when there is nothing to send.
pub fn prepare_latest_digest(dir: &Path, title: &str) -> Result<PreparedEmail> {
    let path = find_latest_digest(dir)?
        .ok_or_else(|| Error::DigestNotFound(dir.to_path_buf()))?;

    let markdown = std::fs::read_to_string(&path)?;
    let date_label = date_label(&path);
    let subject = format!("{} — {}", title, date_label);
    let html_body = render_email_html(title, &date_label, &markdown_to_html(&markdown));

    Ok(PreparedEmail {
        path,
        subject,
        html_body,
        text_body: markdown,
    })
}

/// `digest-20261018.md` -> `20261018`
fn date_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_prefix(DIGEST_PREFIX)
        .and_then(|n| n.strip_suffix(DIGEST_SUFFIX))
        .unwrap_or(&name)
        .to_string()
}

/// SMTP sender using implicit TLS
pub struct Mailer {
    config: MailConfig,
    credentials: MailCredentials,
}

impl Mailer {
    pub fn new(config: MailConfig, credentials: MailCredentials) -> Self {
        Self { config, credentials }
    }

    /// Build a multipart/alternative message from the sender to the recipient
    pub fn build_message(&self, email: &PreparedEmail) -> Result<Message> {
        let from: Mailbox = self.credentials.user
            .parse()
            .map_err(|e| Error::Mail(format!("Invalid sender address: {}", e)))?;

        let to: Mailbox = self.credentials.recipient
            .parse()
            .map_err(|e| Error::Mail(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| Error::Mail(format!("Failed to build email message: {}", e)))
    }

    /// Send over SMTPS with the configured credentials
    pub async fn send(&self, email: &PreparedEmail) -> Result<()> {
        let message = self.build_message(email)?;

        let creds = Credentials::new(
            self.credentials.user.clone(),
            self.credentials.password.clone(),
        );

        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build();

        transport.send(message).await?;

        tracing::info!(
            to = %self.credentials.recipient,
            subject = %email.subject,
            "Email sent successfully"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(user: &str) -> MailCredentials {
        MailCredentials {
            user: user.to_string(),
            password: "secret".to_string(),
            recipient: "reader@example.com".to_string(),
        }
    }

    #[test]
    fn test_no_digest_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let err = prepare_latest_digest(tmp.path(), "AI 每日快讯").unwrap_err();
        assert!(matches!(err, Error::DigestNotFound(ref dir) if dir == tmp.path()));
    }

    #[test]
    fn test_prepare_latest() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("digest-20261017.md"), "# Old\n").unwrap();
        std::fs::write(tmp.path().join("digest-20261018.md"), "# New\n\n- item\n").unwrap();

        let email = prepare_latest_digest(tmp.path(), "AI 每日快讯").unwrap();
        assert_eq!(email.path, tmp.path().join("digest-20261018.md"));
        assert_eq!(email.subject, "AI 每日快讯 — 20261018");
        assert_eq!(email.text_body, "# New\n\n- item\n");
        assert!(email.html_body.contains("<h1>New</h1>"));
        assert!(email.html_body.contains("自动生成于 20261018"));
    }

    #[test]
    fn test_build_message() {
        let email = PreparedEmail {
            path: PathBuf::from("out/digest-20261018.md"),
            subject: "AI Digest — 20261018".to_string(),
            html_body: "<p>hi</p>".to_string(),
            text_body: "hi".to_string(),
        };
        let mailer = Mailer::new(MailConfig::default(), credentials("bot@gmail.com"));

        let message = mailer.build_message(&email).unwrap();
        let envelope = message.envelope();
        assert_eq!(envelope.to()[0].to_string(), "reader@example.com");
        assert_eq!(
            envelope.from().map(|a| a.to_string()).as_deref(),
            Some("bot@gmail.com")
        );

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_invalid_sender_address() {
        let email = PreparedEmail {
            path: PathBuf::from("digest-20261018.md"),
            subject: "s".to_string(),
            html_body: String::new(),
            text_body: String::new(),
        };
        let mailer = Mailer::new(MailConfig::default(), credentials("not-an-address"));
        assert!(matches!(mailer.build_message(&email), Err(Error::Mail(_))));
    }

    #[test]
    fn test_date_label() {
        assert_eq!(date_label(Path::new("out/digest-20261018.md")), "20261018");
    }
}
