//! # court-availability
//!
//! Reads court-booking availability from a venue's single-page booking
//! calendar by driving a headless Chrome through the DevTools Protocol.
//!
//! ## How a crawl works
//!
//! 1. A [`BrowserSession`] launches Chrome and opens the booking page.
//! 2. The [`DatePickerWalker`] clicks each date in the picker in turn, waits for
//!    the slot list to render, and snapshots it.
//! 3. Each snapshot is parsed into open-court counts per on-the-hour slot.
//!    Hours claimed by an "unavailable" card are dropped.
//! 4. The browser is closed and the per-date results come back as a
//!    [`CrawlReport`].
//!
//! ```rust,no_run
//! use court_availability::{CrawlConfig, LaunchOptions, crawl_availability};
//!
//! # fn main() -> court_availability::Result<()> {
//! let report = crawl_availability(&CrawlConfig::default(), LaunchOptions::new().headless(true))?;
//!
//! for (date, slots) in &report.availability {
//!     println!("{date}: {} open slots", slots.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The parsing steps are plain functions and need no browser:
//!
//! ```rust
//! use court_availability::{RawSlotItem, RawSnapshot, extract_availability};
//!
//! let snapshot = RawSnapshot::new(vec![
//!     RawSlotItem::slot("5:00pm", "2 open courts"),
//!     RawSlotItem::slot("5:30pm", "1 open court"),
//!     RawSlotItem::slot("6:00pm", "3 open courts"),
//! ])
//! .with_range("6:00pm - 7:30pm");
//!
//! let availability = extract_availability(&snapshot);
//! assert_eq!(availability.get("5:00pm"), Some(&2));
//! assert_eq!(availability.len(), 1);
//! ```
//!
//! ## Module Overview
//!
//! - [`parse`]: slot text and unavailable-range parsing
//! - [`extract`]: one date's snapshot to its availability map
//! - [`crawl`]: the date-picker walker and its page abstraction
//! - [`browser`]: Chrome session management
//! - [`config`]: booking URL, timeouts and selectors
//! - [`store`]: snapshot persistence
//! - [`server`]: HTTP endpoints (requires the `server` feature)

pub mod browser;
pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod model;
pub mod parse;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub mod server;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions, TabPage};
pub use config::{CrawlConfig, Selectors, Timeouts};
pub use crawl::{BookingPage, DatePickerWalker, crawl_availability};
pub use error::{CrawlError, Result};
pub use extract::{ExtractStats, extract_availability, extract_with_stats};
pub use model::{CrawlReport, DateAvailability, RawSlotItem, RawSnapshot, TimeAvailability};
pub use store::{AvailabilityStore, JsonFileStore, MemoryStore, StoredSnapshot};
