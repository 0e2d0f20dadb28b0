//! Court availability HTTP server
//!
//! Serves live crawls and the stored snapshot over HTTP.

use anyhow::Result;
use clap::Parser;
use court_availability::JsonFileStore;
use court_availability::cli::{CrawlArgs, init_logging};
use court_availability::server::{AppState, create_router};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "availability-server")]
#[command(version)]
#[command(about = "HTTP API for court availability", long_about = None)]
struct Cli {
    #[command(flatten)]
    crawl: CrawlArgs,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short = 'p', default_value = "3000", env = "PORT")]
    port: u16,

    /// Snapshot written by `court-availability refresh`
    #[arg(long, value_name = "PATH", env = "SNAPSHOT_PATH", default_value = "data/availability.json")]
    snapshot: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.crawl.crawl_config()?;
    let store = Arc::new(JsonFileStore::new(&cli.snapshot));
    let state = AppState::new(config, cli.crawl.launch_options(), store);
    let router = create_router(state);

    let bind_addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
