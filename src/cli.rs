//! Command-line options shared by the binaries

use crate::browser::LaunchOptions;
use crate::config::CrawlConfig;
use crate::error::Result;
use clap::Args;
use std::path::PathBuf;

/// Crawl and browser options; flags override the config file, which overrides defaults
///
/// Every flag is global so it may follow a subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct CrawlArgs {
    /// JSON crawl config file
    #[arg(long, value_name = "PATH", env = "CRAWL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Booking page URL; `{date}` is replaced with today's date
    #[arg(long, value_name = "URL", env = "BOOKING_URL", global = true)]
    pub booking_url: Option<String>,

    /// Page load and date picker timeout in milliseconds
    #[arg(long, value_name = "MS", env = "NAVIGATION_TIMEOUT_MS", global = true)]
    pub navigation_timeout_ms: Option<u64>,

    /// Per-date slot list timeout in milliseconds
    #[arg(long, value_name = "MS", env = "SLOT_READY_TIMEOUT_MS", global = true)]
    pub slot_ready_timeout_ms: Option<u64>,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H', global = true)]
    pub headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH", env = "CHROME_PATH", global = true)]
    pub chrome_path: Option<PathBuf>,

    /// Disable Chrome's sandbox (needed when running as root in a container)
    #[arg(long, global = true)]
    pub no_sandbox: bool,
}

impl CrawlArgs {
    pub fn crawl_config(&self) -> Result<CrawlConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_json_file(path)?,
            None => CrawlConfig::default(),
        };

        if let Some(url) = &self.booking_url {
            config.booking_url = url.clone();
        }
        if let Some(ms) = self.navigation_timeout_ms {
            config.navigation_timeout_ms = ms;
        }
        if let Some(ms) = self.slot_ready_timeout_ms {
            config.slot_ready_timeout_ms = ms;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn launch_options(&self) -> LaunchOptions {
        let mut options = LaunchOptions::new().headless(!self.headed).sandbox(!self.no_sandbox);
        if let Some(path) = &self.chrome_path {
            options = options.chrome_path(path);
        }
        options
    }
}

/// Initialize env_logger; `RUST_LOG` wins over the verbosity flag
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
