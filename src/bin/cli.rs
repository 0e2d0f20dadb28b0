//! Court availability command line
//!
//! `crawl` prints a live crawl as JSON, `refresh` replaces the stored snapshot
//! (run it from cron), and `show` prints whatever is stored.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use court_availability::cli::{CrawlArgs, init_logging};
use court_availability::{AvailabilityStore, JsonFileStore, StoredSnapshot, crawl_availability};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "court-availability")]
#[command(version)]
#[command(about = "Read court availability from a venue's booking calendar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    crawl: CrawlArgs,

    /// Where `refresh` writes and `show` reads the snapshot
    #[arg(long, value_name = "PATH", env = "SNAPSHOT_PATH", default_value = "data/availability.json", global = true)]
    snapshot: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl every date and print the availability as JSON
    Crawl,
    /// Crawl every date and replace the stored snapshot
    Refresh,
    /// Print the stored snapshot
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = JsonFileStore::new(&cli.snapshot);

    match cli.command {
        Command::Crawl => {
            let config = cli.crawl.crawl_config()?;
            let report = crawl_availability(&config, cli.crawl.launch_options())?;
            warn_timeouts(&report.timed_out);
            println!("{}", serde_json::to_string_pretty(&report.availability)?);
        }
        Command::Refresh => {
            let config = cli.crawl.crawl_config()?;
            let report = crawl_availability(&config, cli.crawl.launch_options()).context("crawl failed")?;
            warn_timeouts(&report.timed_out);

            let snapshot = StoredSnapshot::new(report.into_availability());
            info!(
                "Replacing stored snapshot with {} dates, {} slots",
                snapshot.availability.len(),
                snapshot.slot_count()
            );
            store.replace_all(&snapshot).context("failed to store snapshot")?;
            info!("Snapshot written to {}", store.path().display());
        }
        Command::Show => {
            let snapshot = store
                .load()?
                .with_context(|| format!("no snapshot at {}", store.path().display()))?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}

fn warn_timeouts(timed_out: &[String]) {
    if !timed_out.is_empty() {
        warn!("Recorded empty because the slot list never loaded: {}", timed_out.join(", "));
    }
}
