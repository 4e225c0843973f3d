// FocusTube entry point
// Classifies video cards and reports which ones productive mode reveals.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use focustube_core::{commands, logging, AppConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "focustube", version, about = "Productive-mode video card filter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a title and print the verdict
    Classify {
        /// Title and metadata text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Label a feed of cards using the stored mode
    Scan {
        /// JSON array of cards
        feed: PathBuf,
        /// Switch productive mode on for this run regardless of the stored flag
        #[arg(long)]
        force: bool,
    },
    /// Show or change productive mode
    Mode {
        #[arg(value_enum)]
        value: Option<Toggle>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    logging::init_tracing(config.log_format)?;

    match cli.command {
        Commands::Classify { text } => {
            let result = commands::classify(&config, &text);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Scan { feed, force } => {
            let cards = commands::load_feed(&feed)
                .with_context(|| format!("Failed to load feed {:?}", feed))?;
            let report = commands::scan_feed(&config, cards, force)
                .await
                .with_context(|| format!("Failed to scan feed {:?}", feed))?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Mode { value } => {
            let requested = value.map(|toggle| matches!(toggle, Toggle::On));
            let enabled = commands::set_mode(&config, requested)
                .with_context(|| format!("Failed to update mode file {:?}", config.mode_file))?;
            println!("{}", commands::mode_label(enabled));
        }
    }
    Ok(())
}
