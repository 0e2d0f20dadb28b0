use crate::{browser::{config::{ConnectionOptions, LaunchOptions},
                      page::TabPage},
            config::CrawlConfig,
            error::{CrawlError, Result}};
use chrono::Utc;
use headless_chrome::{Browser, Tab};
use log::{debug, info, warn};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// A browser instance and the single tab a crawl runs in
///
/// The tab is closed by [`BrowserSession::close`] or, failing that, on drop;
/// dropping the underlying [`Browser`] terminates a launched Chrome process.
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// The page the crawl drives
    tab: Arc<Tab>,

    closed: bool,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Booking SPAs commonly refuse to render for automation-flagged browsers
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        launch_opts.idle_browser_timeout = options.idle_timeout;
        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.path = options.chrome_path;
        launch_opts.user_data_dir = options.user_data_dir;
        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| CrawlError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| CrawlError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tab, closed: false })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| CrawlError::ConnectionFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| CrawlError::ConnectionFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tab, closed: false })
    }

    /// Launch a browser, run `f` against it, and close it again
    ///
    /// The session is closed whether `f` succeeds or fails; a panic inside `f`
    /// still releases the browser through `Drop`.
    pub fn scoped<T, F>(options: LaunchOptions, f: F) -> Result<T>
    where
        F: FnOnce(&BrowserSession) -> Result<T>,
    {
        let mut session = Self::launch(options)?;
        let result = f(&session);

        info!("Closing browser...");
        if let Err(e) = session.close() {
            warn!("Failed to close browser cleanly: {}", e);
        }

        result
    }

    /// Get the crawl tab
    pub fn tab(&self) -> Arc<Tab> {
        self.tab.clone()
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate the crawl tab to a URL
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| CrawlError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab
            .wait_until_navigated()
            .map_err(|e| CrawlError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Open today's booking page and hand it over for crawling
    pub fn open_booking_page(&self, config: &CrawlConfig) -> Result<TabPage> {
        if let Ok(version) = self.browser().get_version() {
            debug!("Crawling with {}", version.product);
        }
        self.tab.set_default_timeout(config.timeouts().navigation);

        let url = config.url_for(Utc::now().date_naive());
        info!("Navigating to booking page {}", url);
        self.navigate(&url)?;
        self.wait_for_navigation()?;

        Ok(TabPage::new(self.tab(), config.selectors.clone()))
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Close the crawl tab
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.tab
            .close(false)
            .map_err(|e| CrawlError::TabOperationFailed(format!("Failed to close tab: {}", e)))?;

        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.close();
        }
    }
}
