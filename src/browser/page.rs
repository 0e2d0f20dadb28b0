use crate::config::Selectors;
use crate::crawl::BookingPage;
use crate::error::{CrawlError, Result};
use crate::model::RawSnapshot;
use headless_chrome::Tab;
use serde_json::Value;
use std::sync::Arc;

/// [`BookingPage`] over a live headless_chrome tab
///
/// Reads go through small in-page scripts parameterized with the configured
/// selectors; clicks go through DevTools element handles looked up fresh on
/// every call.
pub struct TabPage {
    tab: Arc<Tab>,
    selectors: Selectors,
}

impl TabPage {
    pub fn new(tab: Arc<Tab>, selectors: Selectors) -> Self {
        Self { tab, selectors }
    }

    /// Evaluate an expression and return its value (`Null` when it produced none)
    fn evaluate(&self, expression: &str) -> Result<Value> {
        let result = self
            .tab
            .evaluate(expression, false)
            .map_err(|e| CrawlError::EvaluationFailed(e.to_string()))?;

        Ok(result.value.unwrap_or(Value::Null))
    }

    /// Call one of the bundled page functions with the selectors as its argument
    fn call_with_selectors(&self, function: &str) -> Result<Value> {
        let selectors = serde_json::to_string(&self.selectors)
            .map_err(|e| CrawlError::EvaluationFailed(format!("Failed to encode selectors: {}", e)))?;
        self.evaluate(&format!("({})({})", function, selectors))
    }

    fn count(&self, selector: &str) -> Result<usize> {
        let value = self.evaluate(&format!("document.querySelectorAll({}).length", js_string(selector)))?;
        value
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| CrawlError::EvaluationFailed(format!("Expected a count for '{}', got {}", selector, value)))
    }
}

impl BookingPage for TabPage {
    fn date_picker_present(&mut self) -> Result<bool> {
        let value = self.evaluate(&format!("document.querySelector({}) !== null", js_string(&self.selectors.date_list)))?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn date_control_count(&mut self) -> Result<usize> {
        self.count(&self.selectors.date_control)
    }

    fn date_control_text(&mut self, index: usize) -> Result<String> {
        let expression = format!(
            "(function () {{ const el = document.querySelectorAll({})[{}]; return el ? (el.textContent || '').trim() : null; }})()",
            js_string(&self.selectors.date_control),
            index
        );

        match self.evaluate(&expression)? {
            Value::String(text) => Ok(text),
            _ => Err(CrawlError::ElementNotFound(format!("No date control at position {}", index + 1))),
        }
    }

    fn activate_date_control(&mut self, index: usize) -> Result<()> {
        let selector = &self.selectors.date_control;
        let controls = self
            .tab
            .find_elements(selector)
            .map_err(|e| CrawlError::ElementNotFound(format!("Date controls '{}' not found: {}", selector, e)))?;

        let control = controls.get(index).ok_or_else(|| {
            CrawlError::ElementNotFound(format!(
                "Date control {} not found, only {} rendered",
                index + 1,
                controls.len()
            ))
        })?;

        control
            .click()
            .map_err(|e| CrawlError::TabOperationFailed(format!("Failed to click date control {}: {}", index + 1, e)))?;

        Ok(())
    }

    fn mark_slots_stale(&mut self) -> Result<()> {
        self.call_with_selectors(include_str!("mark_stale_slots.js"))?;
        Ok(())
    }

    fn slots_ready(&mut self) -> Result<bool> {
        let value = self.call_with_selectors(include_str!("slots_ready.js"))?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn selected_date_index(&mut self) -> Result<Option<usize>> {
        let value = self.call_with_selectors(include_str!("selected_index.js"))?;
        Ok(value.as_u64().map(|n| n as usize))
    }

    fn snapshot(&mut self) -> Result<RawSnapshot> {
        let value = self.call_with_selectors(include_str!("collect_snapshot.js"))?;

        // The script returns a JSON string
        let json = value
            .as_str()
            .ok_or_else(|| CrawlError::SnapshotParseFailed(format!("Expected a JSON string, got {}", value)))?;

        serde_json::from_str(json).map_err(|e| CrawlError::SnapshotParseFailed(e.to_string()))
    }

    fn selected_date_attribute(&mut self) -> Result<Option<String>> {
        let expression = format!(
            "(function () {{ const el = document.querySelector({}); return el ? (el.getAttribute('datetime') || '') : ''; }})()",
            js_string(&self.selectors.selected_date)
        );

        let value = self.evaluate(&expression)?;
        Ok(value.as_str().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string))
    }
}

/// Quote a Rust string as a JavaScript string literal
fn js_string(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string(r#"ol[class*="days-list"]"#), r#""ol[class*=\"days-list\"]""#);
    }

    #[test]
    fn test_selectors_serialize_with_script_keys() {
        let json = serde_json::to_value(Selectors::default()).unwrap();
        for key in ["slotItem", "slotTime", "slotInfo", "slotTimeContainer", "unavailableCard", "unavailableTime"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_scripts_read_expected_keys() {
        let snapshot_js = include_str!("collect_snapshot.js");
        for key in ["selectors.slotItem", "selectors.unavailableCard", "selectors.unavailableTime", "selectors.slotTime", "selectors.slotInfo"] {
            assert!(snapshot_js.contains(key), "collect_snapshot.js does not read {key}");
        }
        assert!(include_str!("slots_ready.js").contains("selectors.slotTimeContainer"));
    }
}
