use anyhow::Result;

use aidigest_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    if config.feeds.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }

    println!("Feeds ({}):\n", config.feeds.len());

    for feed in &config.feeds {
        let name = if feed.name.trim().is_empty() {
            "(feed title)"
        } else {
            feed.name.as_str()
        };

        if feed.url.trim().is_empty() {
            println!("  {} [SKIPPED: no url]", name);
        } else {
            println!("  {}", name);
            println!("    URL: {}", feed.url);
        }
    }

    println!(
        "\nWindow: last {} hours, {} keywords",
        config.filter.window_hours,
        config.filter.keywords.len()
    );

    Ok(())
}
