use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Open-court count per on-the-hour time label, in DOM order
pub type TimeAvailability = IndexMap<String, u32>;

/// Availability per ISO calendar date (`YYYY-MM-DD`), in visit order
pub type DateAvailability = IndexMap<String, TimeAvailability>;

/// One entry of the slot list as rendered for the displayed date
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawSlotItem {
    /// Text of the time sub-element, `None` when absent or blank
    #[serde(default)]
    pub time: Option<String>,

    /// Text of the info sub-element, `None` when absent or blank
    #[serde(default)]
    pub info: Option<String>,

    /// The entry is an "unavailable" card rather than a bookable slot
    #[serde(default)]
    pub is_unavailable_block: bool,
}

impl RawSlotItem {
    /// A bookable slot entry
    pub fn slot(time: impl Into<String>, info: impl Into<String>) -> Self {
        Self { time: Some(time.into()), info: Some(info.into()), is_unavailable_block: false }
    }

    /// An unavailable card; its label carries no usable time
    pub fn unavailable() -> Self {
        Self { time: None, info: None, is_unavailable_block: true }
    }

    /// Builder method: drop the time text
    pub fn without_time(mut self) -> Self {
        self.time = None;
        self
    }

    /// Builder method: drop the info text
    pub fn without_info(mut self) -> Self {
        self.info = None;
        self
    }
}

/// Everything the extractor reads from one date's view, captured in a single pass
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    #[serde(default)]
    pub items: Vec<RawSlotItem>,

    /// Text of every unavailable card's time range, e.g. `"5:00pm - 7:30pm"`
    #[serde(default)]
    pub unavailable_ranges: Vec<String>,
}

impl RawSnapshot {
    pub fn new(items: Vec<RawSlotItem>) -> Self {
        Self { items, unavailable_ranges: Vec::new() }
    }

    /// Builder method: add an unavailable range
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.unavailable_ranges.push(range.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of one crawl
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    pub availability: DateAvailability,

    /// Date keys recorded empty because their slot list never became ready
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timed_out: Vec<String>,
}

impl CrawlReport {
    /// Whether every visited date produced a full extraction
    pub fn is_complete(&self) -> bool {
        self.timed_out.is_empty()
    }

    pub fn into_availability(self) -> DateAvailability {
        self.availability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_deserialization() {
        let json = r#"{
            "items": [
                {"time": "5:00pm", "info": "2 open courts", "isUnavailableBlock": false},
                {"time": null, "info": null, "isUnavailableBlock": true},
                {"info": "1 open court"}
            ],
            "unavailableRanges": ["5:00pm - 7:30pm"]
        }"#;

        let snapshot: RawSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.items.len(), 3);
        assert_eq!(snapshot.items[0], RawSlotItem::slot("5:00pm", "2 open courts"));
        assert_eq!(snapshot.items[1], RawSlotItem::unavailable());
        assert_eq!(snapshot.items[2].time, None);
        assert_eq!(snapshot.unavailable_ranges, vec!["5:00pm - 7:30pm"]);
    }

    #[test]
    fn test_date_availability_keeps_insertion_order() {
        let mut day = TimeAvailability::new();
        day.insert("9:00pm".to_string(), 1);
        day.insert("8:00am".to_string(), 4);

        let mut dates = DateAvailability::new();
        dates.insert("2025-03-02".to_string(), day);
        dates.insert("2025-03-01".to_string(), TimeAvailability::new());

        let json = serde_json::to_string(&dates).unwrap();
        assert_eq!(json, r#"{"2025-03-02":{"9:00pm":1,"8:00am":4},"2025-03-01":{}}"#);
    }

    #[test]
    fn test_crawl_report_omits_empty_timeouts() {
        let report = CrawlReport::default();
        assert!(report.is_complete());
        assert_eq!(serde_json::to_string(&report).unwrap(), r#"{"availability":{}}"#);
    }
}
