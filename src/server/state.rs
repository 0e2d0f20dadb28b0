//! Shared state for the HTTP handlers.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::browser::LaunchOptions;
use crate::config::CrawlConfig;
use crate::crawl::crawl_availability;
use crate::error::Result;
use crate::model::CrawlReport;
use crate::store::AvailabilityStore;

/// Runs one crawl; blocking, called from a worker thread
pub type Crawler = Arc<dyn Fn(&CrawlConfig, &LaunchOptions) -> Result<CrawlReport> + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CrawlConfig>,
    pub launch: LaunchOptions,
    pub store: Arc<dyn AvailabilityStore>,
    pub crawler: Crawler,
    /// Held for the duration of a live crawl so only one browser runs at a time
    pub crawl_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// State that crawls with a real browser
    pub fn new(config: CrawlConfig, launch: LaunchOptions, store: Arc<dyn AvailabilityStore>) -> Self {
        Self::with_crawler(config, launch, store, Arc::new(|config: &CrawlConfig, launch: &LaunchOptions| {
            crawl_availability(config, launch.clone())
        }))
    }

    pub fn with_crawler(
        config: CrawlConfig,
        launch: LaunchOptions,
        store: Arc<dyn AvailabilityStore>,
        crawler: Crawler,
    ) -> Self {
        Self { config: Arc::new(config), launch, store, crawler, crawl_lock: Arc::new(Mutex::new(())) }
    }
}
