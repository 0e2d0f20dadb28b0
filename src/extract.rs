//! Single-date extraction
//!
//! Turns the raw snapshot of one displayed date into its [`TimeAvailability`].
//! The snapshot must be taken only after the slot list is ready (see
//! [`crate::crawl::BookingPage::slots_ready`]); an empty or partial list would
//! otherwise read as "no availability" instead of "not loaded yet".

use crate::model::{RawSnapshot, TimeAvailability};
use crate::parse::{RejectReason, SlotParse, blocked_start_times, parse_slot};
use indexmap::IndexMap;
use log::debug;

/// Counters describing how one snapshot was interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub items: usize,
    pub accepted: usize,
    pub blocked_times: usize,
    pub rejected: IndexMap<RejectReason, usize>,
}

impl ExtractStats {
    pub fn rejected_for(&self, reason: RejectReason) -> usize {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }

    fn reject(&mut self, reason: RejectReason) {
        *self.rejected.entry(reason).or_insert(0) += 1;
    }
}

/// Extract the open-court count per on-the-hour slot for the displayed date
pub fn extract_availability(snapshot: &RawSnapshot) -> TimeAvailability {
    extract_with_stats(snapshot).0
}

/// Like [`extract_availability`], also reporting why entries were dropped
pub fn extract_with_stats(snapshot: &RawSnapshot) -> (TimeAvailability, ExtractStats) {
    let blocked = blocked_start_times(&snapshot.unavailable_ranges);
    let mut availability = TimeAvailability::new();
    let mut stats = ExtractStats { items: snapshot.items.len(), blocked_times: blocked.len(), ..Default::default() };

    for item in &snapshot.items {
        match parse_slot(item) {
            SlotParse::Recognized { time, .. } if blocked.contains(&time) => {
                debug!("Dropping {} (claimed by an unavailable range)", time);
                stats.reject(RejectReason::Blocked);
            }
            SlotParse::Recognized { time, courts } => {
                // Repeated labels keep the later entry
                availability.insert(time, courts);
                stats.accepted += 1;
            }
            SlotParse::Rejected(reason) => {
                if reason != RejectReason::UnavailableBlock {
                    debug!("Skipping slot entry {:?}: {}", item.time, reason);
                }
                stats.reject(reason);
            }
        }
    }

    (availability, stats)
}
