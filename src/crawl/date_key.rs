use chrono::{DateTime, NaiveDate};

const ISO_DATE: &str = "%Y-%m-%d";

/// Where a date key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKeySource {
    /// The selected control's `datetime` attribute
    Attribute,
    /// The control's display text, used when the attribute is unreadable
    DisplayText,
    /// `Date <n>`, used when both are unusable
    Ordinal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateKey {
    pub key: String,
    pub source: DateKeySource,
}

impl DateKey {
    pub fn is_iso(&self) -> bool {
        self.source == DateKeySource::Attribute
    }
}

/// Turn the raw `datetime` attribute into a calendar date
///
/// The venue emits epoch milliseconds, taken as a UTC date. Plain
/// `YYYY-MM-DD` and RFC 3339 values are accepted too.
pub fn parse_date_attribute(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE) {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }

    let millis: i64 = raw.parse().ok()?;
    DateTime::from_timestamp_millis(millis).map(|datetime| datetime.date_naive())
}

/// Resolve the key a date's availability is stored under
///
/// `index` is zero-based and only used for the last-resort `Date <n>` key.
pub fn resolve_date_key(attribute: Option<&str>, display_text: &str, index: usize) -> DateKey {
    if let Some(date) = attribute.and_then(parse_date_attribute) {
        return DateKey { key: date.format(ISO_DATE).to_string(), source: DateKeySource::Attribute };
    }

    let text = display_text.trim();
    if !text.is_empty() {
        return DateKey { key: text.to_string(), source: DateKeySource::DisplayText };
    }

    DateKey { key: format!("Date {}", index + 1), source: DateKeySource::Ordinal }
}

/// Whether a key is a strict `YYYY-MM-DD` calendar date
pub fn is_iso_date_key(key: &str) -> bool {
    key.len() == 10 && NaiveDate::parse_from_str(key, ISO_DATE).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_millis_attribute() {
        // 2025-03-01T05:00:00Z
        let key = resolve_date_key(Some("1740805200000"), "Sat 1", 0);
        assert_eq!(key.key, "2025-03-01");
        assert_eq!(key.source, DateKeySource::Attribute);
    }

    #[test]
    fn test_epoch_millis_uses_utc_date() {
        // 2025-03-01T23:30:00Z
        assert_eq!(parse_date_attribute("1740871800000"), NaiveDate::from_ymd_opt(2025, 3, 1));
        // 2025-03-02T00:30:00Z
        assert_eq!(parse_date_attribute("1740875400000"), NaiveDate::from_ymd_opt(2025, 3, 2));
    }

    #[test]
    fn test_iso_and_rfc3339_attributes() {
        assert_eq!(parse_date_attribute("2025-03-01"), NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(parse_date_attribute("2025-03-01T19:00:00-05:00"), NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_unreadable_attribute_falls_back_to_text() {
        for attribute in [None, Some(""), Some("  "), Some("soon")] {
            let key = resolve_date_key(attribute, "  Tue 4  ", 3);
            assert_eq!(key.key, "Tue 4");
            assert_eq!(key.source, DateKeySource::DisplayText);
            assert!(!key.is_iso());
        }
    }

    #[test]
    fn test_blank_text_falls_back_to_ordinal() {
        let key = resolve_date_key(None, "", 2);
        assert_eq!(key.key, "Date 3");
        assert_eq!(key.source, DateKeySource::Ordinal);
    }

    #[test]
    fn test_is_iso_date_key() {
        assert!(is_iso_date_key("2025-03-01"));
        assert!(!is_iso_date_key("2025-3-1"));
        assert!(!is_iso_date_key("2025-02-30"));
        assert!(!is_iso_date_key("Sat 1"));
    }
}
