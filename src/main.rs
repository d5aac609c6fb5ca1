use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hot100_playlist::{
    ChartDate, ChartScraper, Config, DatePrompt, DateSource, FixedDate, PlaylistBuilder,
    RunOutcome, SpotifyCatalog,
};

#[derive(Parser)]
#[command(name = "hot100-playlist")]
#[command(about = "Create a private Spotify playlist from a Billboard Hot 100 chart")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Chart date (YYYY-MM-DD); prompts when omitted
    #[arg(long)]
    date: Option<ChartDate>,

    /// Scrape and search without creating a playlist
    #[arg(long)]
    dry_run: bool,

    /// Write a JSON report of the run to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().without_time().with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = match Config::from_env().and_then(Config::validate) {
        Ok(config) => config,
        Err(e) => {
            error!("{}. Please check your .env file.", e);
            std::process::exit(1);
        }
    };

    let catalog = SpotifyCatalog::new(&config);
    let scraper = ChartScraper::new().context("Failed to build chart HTTP client")?;

    let mut dates: Box<dyn DateSource> = match cli.date {
        Some(date) => Box::new(FixedDate(date)),
        None => Box::new(DatePrompt::stdin()),
    };

    let outcome = PlaylistBuilder::new(&catalog, &scraper)
        .dry_run(cli.dry_run)
        .run(dates.as_mut())
        .await;

    if let RunOutcome::Finished(report) = outcome {
        report.print_summary();

        if let Some(path) = &cli.report {
            if let Err(e) = report.save(path) {
                error!("Failed to save run report: {}", e);
            }
        }
    }

    Ok(())
}
