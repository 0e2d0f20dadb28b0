use crate::model::RawSlotItem;
use crate::parse::is_half_hour;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static OPEN_COURTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+open\s+court").expect("open-courts pattern is valid"));

/// Why a slot entry produced no availability entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// An unavailable card; its time comes only from the range text
    UnavailableBlock,
    UnknownTime,
    HalfHour,
    NoAvailabilityInfo,
    /// Recognized, but an unavailable range starts at the same hour
    Blocked,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::UnavailableBlock => "unavailable block",
            RejectReason::UnknownTime => "unknown time",
            RejectReason::HalfHour => "half-hour slot",
            RejectReason::NoAvailabilityInfo => "no availability info",
            RejectReason::Blocked => "blocked by unavailable range",
        };
        f.write_str(text)
    }
}

/// Outcome of parsing one slot entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotParse {
    Recognized { time: String, courts: u32 },
    Rejected(RejectReason),
}

/// Parse one slot entry into a time label and open-court count
///
/// The label is trimmed and otherwise kept verbatim; it is the venue's own
/// display string and is used as the map key as-is.
pub fn parse_slot(item: &RawSlotItem) -> SlotParse {
    if item.is_unavailable_block {
        return SlotParse::Rejected(RejectReason::UnavailableBlock);
    }

    let time = match item.time.as_deref().map(str::trim) {
        Some(time) if !time.is_empty() => time,
        _ => return SlotParse::Rejected(RejectReason::UnknownTime),
    };

    if is_half_hour(time) {
        return SlotParse::Rejected(RejectReason::HalfHour);
    }

    match item.info.as_deref().and_then(parse_open_courts) {
        Some(courts) => SlotParse::Recognized { time: time.to_string(), courts },
        None => SlotParse::Rejected(RejectReason::NoAvailabilityInfo),
    }
}

/// Extract `N` from text like `"2 open courts"`
pub fn parse_open_courts(info: &str) -> Option<u32> {
    OPEN_COURTS_RE.captures(info)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognized(time: &str, courts: u32) -> SlotParse {
        SlotParse::Recognized { time: time.to_string(), courts }
    }

    #[test]
    fn test_parse_plural_and_singular() {
        assert_eq!(parse_slot(&RawSlotItem::slot("5:00pm", "2 open courts")), recognized("5:00pm", 2));
        assert_eq!(parse_slot(&RawSlotItem::slot("6:00pm", "1 open court")), recognized("6:00pm", 1));
        assert_eq!(parse_slot(&RawSlotItem::slot("7:00pm", "0 open court")), recognized("7:00pm", 0));
    }

    #[test]
    fn test_time_label_is_trimmed_not_normalized() {
        let item = RawSlotItem::slot("  7:00PM \n", "3 open courts");
        assert_eq!(parse_slot(&item), recognized("7:00PM", 3));
    }

    #[test]
    fn test_count_inside_longer_text() {
        let item = RawSlotItem::slot("8:00am", "Pickleball · 4 open courts · $40/hr");
        assert_eq!(parse_slot(&item), recognized("8:00am", 4));
    }

    #[test]
    fn test_half_hour_rejected_regardless_of_info() {
        for info in ["2 open courts", "1 open court", "", "Fully booked"] {
            let item = RawSlotItem::slot("5:30pm", info);
            assert_eq!(parse_slot(&item), SlotParse::Rejected(RejectReason::HalfHour), "info: {info:?}");
        }
        let no_info = RawSlotItem::slot("11:30am", "x").without_info();
        assert_eq!(parse_slot(&no_info), SlotParse::Rejected(RejectReason::HalfHour));
    }

    #[test]
    fn test_unavailable_block_rejected() {
        let mut item = RawSlotItem::unavailable();
        item.time = Some("Unavailable".to_string());
        item.info = Some("4 open courts".to_string());
        assert_eq!(parse_slot(&item), SlotParse::Rejected(RejectReason::UnavailableBlock));
    }

    #[test]
    fn test_missing_or_blank_time() {
        let missing = RawSlotItem::slot("5:00pm", "2 open courts").without_time();
        assert_eq!(parse_slot(&missing), SlotParse::Rejected(RejectReason::UnknownTime));

        let blank = RawSlotItem::slot("   ", "2 open courts");
        assert_eq!(parse_slot(&blank), SlotParse::Rejected(RejectReason::UnknownTime));
    }

    #[test]
    fn test_no_availability_info() {
        let missing = RawSlotItem::slot("5:00pm", "").without_info();
        assert_eq!(parse_slot(&missing), SlotParse::Rejected(RejectReason::NoAvailabilityInfo));

        let wording = RawSlotItem::slot("5:00pm", "Fully booked");
        assert_eq!(parse_slot(&wording), SlotParse::Rejected(RejectReason::NoAvailabilityInfo));

        let no_number = RawSlotItem::slot("5:00pm", "open courts");
        assert_eq!(parse_slot(&no_number), SlotParse::Rejected(RejectReason::NoAvailabilityInfo));
    }

    #[test]
    fn test_count_overflow_is_no_info() {
        assert_eq!(parse_open_courts("99999999999 open courts"), None);
        assert_eq!(parse_open_courts("12 open courts"), Some(12));
    }

    #[test]
    fn test_reject_reason_display() {
        assert_eq!(RejectReason::UnknownTime.to_string(), "unknown time");
        assert_eq!(RejectReason::NoAvailabilityInfo.to_string(), "no availability info");
    }
}
