//! Multi-date crawl engine
//!
//! This module drives the venue's date picker one date at a time:
//! - [`BookingPage`]: the page operations the crawl needs, implemented over a
//!   live tab by [`crate::browser::TabPage`]
//! - [`Wait`]: bounded predicate waits for asynchronously rendered content
//! - [`DatePickerWalker`]: the per-date state machine
//! - [`resolve_date_key`]: mapping the selected control to a `YYYY-MM-DD` key

pub mod date_key;
pub mod page;
pub mod wait;
pub mod walker;

pub use date_key::{DateKey, DateKeySource, is_iso_date_key, parse_date_attribute, resolve_date_key};
pub use page::BookingPage;
pub use wait::{Wait, WaitOutcome};
pub use walker::{DatePickerWalker, WalkState};

use crate::browser::{BrowserSession, LaunchOptions};
use crate::config::CrawlConfig;
use crate::error::Result;
use crate::model::CrawlReport;
use log::info;

/// Launch a browser, crawl every date the booking page offers, and close the browser
///
/// The browser is closed on every exit path, including errors raised mid-crawl.
pub fn crawl_availability(config: &CrawlConfig, options: LaunchOptions) -> Result<CrawlReport> {
    config.validate()?;
    info!("Starting browser...");

    BrowserSession::scoped(options, |session| {
        let page = session.open_booking_page(config)?;
        DatePickerWalker::new(page, config.timeouts()).run()
    })
}
