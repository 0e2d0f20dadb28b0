use crate::parse::is_half_hour;
use indexmap::IndexSet;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}:\d{2}(?:am|pm))\s*-\s*(\d{1,2}:\d{2}(?:am|pm))\b")
        .expect("unavailable-range pattern is valid")
});

/// Start labels of hours claimed by an unavailable card, in first-seen order
pub type BlockedTimes = IndexSet<String>;

/// A parsed `"<start> - <end>"` range from an unavailable card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnavailableRange {
    pub start: String,
    pub end: String,
}

impl UnavailableRange {
    /// Whether the range blocks the whole hour at its start
    pub fn blocks_start_hour(&self) -> bool {
        !is_half_hour(&self.start)
    }
}

/// Parse range text like `"5:00pm - 7:30pm"`
pub fn parse_range(text: &str) -> Option<UnavailableRange> {
    let caps = RANGE_RE.captures(text)?;
    Some(UnavailableRange { start: caps[1].to_string(), end: caps[2].to_string() })
}

/// Collect the start labels that must never be reported as available
///
/// Ranges starting on a half hour only overlap an hourly slot that is
/// accounted for by its own entry, so they block nothing. Text that does not
/// parse as a range is dropped.
pub fn blocked_start_times<I, S>(ranges: I) -> BlockedTimes
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut blocked = BlockedTimes::new();

    for text in ranges {
        let text = text.as_ref();
        match parse_range(text) {
            Some(range) if range.blocks_start_hour() => {
                blocked.insert(range.start);
            }
            Some(range) => debug!("Ignoring half-hour unavailable range {} - {}", range.start, range.end),
            None => debug!("Ignoring unrecognized unavailable range {:?}", text),
        }
    }

    blocked
}
