use anyhow::Result;
use chrono::Local;

use aidigest_core::{Aggregator, AppConfig};

pub async fn run(config: &AppConfig) -> Result<()> {
    let feed_count = config.active_feeds().count();
    if feed_count == 0 {
        println!("No feeds configured.");
        println!("\nAdd feeds to your configuration, e.g.:");
        println!("  feeds:");
        println!("    - name: OpenAI Blog");
        println!("      url: https://openai.com/blog/rss.xml");
        return Ok(());
    }

    println!("Aggregating {} feeds...\n", feed_count);

    let aggregator = Aggregator::new(config)?;
    match aggregator.run(config, Local::now()).await? {
        Some(path) => println!("Wrote: {}", path.display()),
        None => println!(
            "No new items in last {} hours.",
            config.filter.window_hours
        ),
    }

    Ok(())
}
