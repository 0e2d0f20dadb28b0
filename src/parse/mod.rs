//! Text parsing for slot-list entries
//!
//! Both parsers are pure functions over strings captured from the page, so
//! they are tested here without a browser:
//! - [`slot`]: one slot entry to a time label and open-court count
//! - [`unavailable`]: unavailable-card ranges to the set of blocked start times

pub mod slot;
pub mod unavailable;

pub use slot::{RejectReason, SlotParse, parse_slot};
pub use unavailable::{BlockedTimes, UnavailableRange, blocked_start_times, parse_range};

/// Whether a time label sits on a half-hour mark
///
/// The venue books by the hour; half-hour entries duplicate the adjacent hourly block.
pub fn is_half_hour(label: &str) -> bool {
    label.contains(":30")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_half_hour() {
        assert!(is_half_hour("5:30pm"));
        assert!(is_half_hour("12:30am"));
        assert!(!is_half_hour("5:00pm"));
        assert!(!is_half_hour("10:00am"));
    }
}
