//! Crawl configuration
//!
//! Everything venue-specific lives here: the booking URL template, the wait
//! budgets, and the CSS selectors the in-page scripts use. Selectors match
//! structural class-name fragments (`[class*=...]`) rather than the hashed
//! class names the venue's build emits.

use crate::error::{CrawlError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DATE_PLACEHOLDER: &str = "{date}";

/// Settings for one crawl
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CrawlConfig {
    /// Booking page URL; `{date}` is replaced with the start date as `YYYY-MM-DD`
    pub booking_url: String,

    /// Caps page load and the wait for the date picker
    pub navigation_timeout_ms: u64,

    /// Caps the per-date wait for the slot list to render
    pub slot_ready_timeout_ms: u64,

    /// Delay between readiness checks
    pub poll_interval_ms: u64,

    pub selectors: Selectors,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            booking_url: "https://goodland.podplay.app/book/greenpoint-indoor-1/{date}".to_string(),
            navigation_timeout_ms: 30_000,
            slot_ready_timeout_ms: 15_000,
            poll_interval_ms: 100,
            selectors: Selectors::default(),
        }
    }
}

impl CrawlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the booking URL template
    pub fn booking_url(mut self, url: impl Into<String>) -> Self {
        self.booking_url = url.into();
        self
    }

    /// Builder method: set the navigation timeout in milliseconds
    pub fn navigation_timeout_ms(mut self, ms: u64) -> Self {
        self.navigation_timeout_ms = ms;
        self
    }

    /// Builder method: set the per-date slot readiness timeout in milliseconds
    pub fn slot_ready_timeout_ms(mut self, ms: u64) -> Self {
        self.slot_ready_timeout_ms = ms;
        self
    }

    /// Builder method: set the readiness poll interval in milliseconds
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Load a JSON config file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CrawlError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| CrawlError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.booking_url.trim().is_empty() {
            return Err(CrawlError::Config("bookingUrl must not be empty".to_string()));
        }
        if self.navigation_timeout_ms == 0 || self.slot_ready_timeout_ms == 0 {
            return Err(CrawlError::Config("timeouts must be greater than zero".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(CrawlError::Config("pollIntervalMs must be greater than zero".to_string()));
        }
        self.selectors.validate()
    }

    /// Booking URL for a given start date
    pub fn url_for(&self, date: NaiveDate) -> String {
        self.booking_url.replace(DATE_PLACEHOLDER, &date.format("%Y-%m-%d").to_string())
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            navigation: Duration::from_millis(self.navigation_timeout_ms),
            slot_ready: Duration::from_millis(self.slot_ready_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

/// Wait budgets used by the date-picker walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub navigation: Duration,
    pub slot_ready: Duration,
    pub poll_interval: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        CrawlConfig::default().timeouts()
    }
}

/// CSS selectors for the parts of the booking page the crawl reads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Selectors {
    /// The date-selector list
    pub date_list: String,

    /// Clickable controls inside the date-selector list, one per date
    pub date_control: String,

    /// Element carrying the `datetime` attribute of the selected date
    pub selected_date: String,

    /// One entry of the slot list
    pub slot_item: String,

    /// Time container inside a slot entry, checked for readiness
    pub slot_time_container: String,

    /// Time label inside a slot entry
    pub slot_time: String,

    /// Availability text inside a slot entry
    pub slot_info: String,

    /// Marker for an unavailable card inside a slot entry
    pub unavailable_card: String,

    /// Range text inside an unavailable card
    pub unavailable_time: String,
}

impl Default for Selectors {
    fn default() -> Self {
        let date_list = r#"ol[class*="BookingDatePicker"][class*="days-list"]"#;
        Self {
            date_list: date_list.to_string(),
            date_control: format!("{date_list} li button"),
            selected_date: format!(r#"{date_list} li[class*="days-list-item--selected"] button time"#),
            slot_item: r#"ol[class*="BookingItemPicker"][class*="sessions-list"] > li"#.to_string(),
            slot_time_container: r#"div[class*="sessions-list-item-time"]"#.to_string(),
            slot_time: r#"div[class*="sessions-list-item-time"] time"#.to_string(),
            slot_info: r#"div[class*="sessions-list-item-info-tables"]"#.to_string(),
            unavailable_card: r#"div[class*="unavailable-card"]"#.to_string(),
            unavailable_time: r#"div[class*="unavailable-card__time"]"#.to_string(),
        }
    }
}

impl Selectors {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("dateList", &self.date_list),
            ("dateControl", &self.date_control),
            ("selectedDate", &self.selected_date),
            ("slotItem", &self.slot_item),
            ("slotTimeContainer", &self.slot_time_container),
            ("slotTime", &self.slot_time),
            ("slotInfo", &self.slot_info),
            ("unavailableCard", &self.unavailable_card),
            ("unavailableTime", &self.unavailable_time),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(CrawlError::Config(format!("selector {name} must not be empty"))),
            None => Ok(()),
        }
    }
}
