use anyhow::Result;

use aidigest_core::{
    mail::{prepare_latest_digest, MailCredentials, Mailer},
    AppConfig,
};

pub async fn run(config: &AppConfig, dry_run: bool) -> Result<()> {
    if dry_run {
        let email = prepare_latest_digest(&config.output.dir, &config.output.title)?;
        println!("Digest:  {}", email.path.display());
        println!("Subject: {}", email.subject);
        println!("HTML:    {} bytes", email.html_body.len());
        println!("\nDry run, nothing sent.");
        return Ok(());
    }

    let credentials = MailCredentials::from_env()?;
    let email = prepare_latest_digest(&config.output.dir, &config.output.title)?;

    println!("Sending {} ...", email.path.display());

    let recipient = credentials.recipient.clone();
    let mailer = Mailer::new(config.mail.clone(), credentials);
    mailer.send(&email).await?;

    println!("Sent to {}", recipient);

    Ok(())
}
