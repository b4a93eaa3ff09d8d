// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr)
// 3. Wire Ctrl-C to a cancellation token
// 4. Run the crawl and write the JSON report
// 5. Exit with proper code (0 = completed, 1 = interrupted, 2 = error)
// =============================================================================

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use cli::Cli;
use webscraper::crawl::Crawler;
use webscraper::{logging, output};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

// Returns:
//   Ok(0) = crawl completed, report written
//   Ok(1) = interrupted, partial report written
//   Err   = bad configuration or the report could not be written
async fn run(cli: Cli) -> Result<ExitCode> {
    let (config, output_path) = cli.into_config();

    let crawler = Crawler::new(config).context("cannot start crawl")?;

    // First Ctrl-C stops scheduling; the crawl drains and we still write
    // whatever was collected
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let outcome = crawler.crawl(cancel).await;
    let stats = &outcome.stats;
    tracing::info!(
        fetched = stats.pages_fetched,
        failed = stats.pages_failed,
        queued = stats.links_queued,
        dropped = stats.links_dropped,
        entities = outcome.report.total(),
        "crawl finished"
    );

    output::write_report(&outcome.report, output_path.as_deref())?;

    if stats.interrupted {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
