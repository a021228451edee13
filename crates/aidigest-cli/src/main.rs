use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aidigest_core::{config::DEFAULT_CONFIG_PATH, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "aidigest")]
#[command(author, version, about = "Aggregate AI news from RSS feeds into a daily Markdown digest")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Feed configuration file (YAML, or TOML when the name ends in .toml)
    #[arg(short, long, global = true, env = "AIDIGEST_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory for digest files (overrides output.dir)
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch feeds and write today's digest (default)
    Aggregate,
    /// Email the latest digest
    Mail {
        /// Render the email and print what would be sent, without connecting
        #[arg(long)]
        dry_run: bool,
    },
    /// List the configured feeds
    Feeds,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The mail step only needs output/mail settings, so a missing feed list is fine there
    let config_required = !matches!(cli.command, Some(Commands::Mail { .. }));
    let mut config = load_config(&cli.config, config_required)?;
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Some(Commands::Aggregate) | None => commands::aggregate::run(&config).await,
        Some(Commands::Mail { dry_run }) => commands::mail::run(&config, dry_run).await,
        Some(Commands::Feeds) => commands::feeds::run(&config),
    }
}

fn load_config(path: &Path, required: bool) -> Result<AppConfig> {
    if !required && !path.exists() {
        return Ok(AppConfig::default());
    }
    Ok(AppConfig::load(path)?)
}
