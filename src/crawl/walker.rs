use crate::config::Timeouts;
use crate::crawl::date_key::{DateKeySource, resolve_date_key};
use crate::crawl::page::BookingPage;
use crate::crawl::wait::{Wait, WaitOutcome};
use crate::error::{CrawlError, Result};
use crate::extract::extract_with_stats;
use crate::model::{CrawlReport, TimeAvailability};
use log::{debug, info, trace, warn};

/// Where the walker is in its crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    Idle,
    AwaitingDatePicker,
    ForEachDate { index: usize },
    AwaitingSlotList { index: usize },
    ExtractingDate { index: usize },
    ResolvingDateKey { index: usize },
    Accumulating { index: usize },
    Done,
}

/// Walks every entry of the date picker and collects availability per date
///
/// Dates are visited in the order the picker lists them. A date whose slot
/// list never becomes ready is recorded with an empty mapping and the crawl
/// moves on; a date picker that never appears ends the crawl with an error.
pub struct DatePickerWalker<P: BookingPage> {
    page: P,
    timeouts: Timeouts,
    state: WalkState,
    report: CrawlReport,
}

impl<P: BookingPage> DatePickerWalker<P> {
    pub fn new(page: P, timeouts: Timeouts) -> Self {
        Self { page, timeouts, state: WalkState::Idle, report: CrawlReport::default() }
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Run the crawl to completion
    pub fn run(mut self) -> Result<CrawlReport> {
        let date_count = self.await_date_picker()?;
        info!("Found {} date controls to check", date_count);

        for index in 0..date_count {
            self.visit_date(index)?;
        }

        self.enter(WalkState::Done);
        info!(
            "Crawl complete: {} dates, {} timed out",
            self.report.availability.len(),
            self.report.timed_out.len()
        );
        Ok(self.report)
    }

    fn await_date_picker(&mut self) -> Result<usize> {
        self.enter(WalkState::AwaitingDatePicker);

        let wait = Wait::new(self.timeouts.navigation, self.timeouts.poll_interval);
        let page = &mut self.page;
        if wait.until(|| page.date_picker_present())? == WaitOutcome::TimedOut {
            return Err(CrawlError::Timeout {
                what: "date picker".to_string(),
                timeout_ms: millis(wait.timeout().as_millis()),
            });
        }

        let count = self.page.date_control_count()?;
        if count == 0 {
            warn!("Date picker is present but lists no dates");
        }
        Ok(count)
    }

    fn visit_date(&mut self, index: usize) -> Result<()> {
        self.enter(WalkState::ForEachDate { index });
        let display_text = self.page.date_control_text(index)?;
        info!("Checking availability for {}", display_text_or_index(&display_text, index));
        self.page.mark_slots_stale()?;
        self.page.activate_date_control(index)?;

        self.enter(WalkState::AwaitingSlotList { index });
        let wait = Wait::new(self.timeouts.slot_ready, self.timeouts.poll_interval);
        let page = &mut self.page;
        let ready = wait.until(|| showing_date(page, index))?.is_ready();

        let availability = if ready {
            self.extract_date(index)?
        } else {
            TimeAvailability::new()
        };

        self.enter(WalkState::ResolvingDateKey { index });
        let attribute = match self.page.selected_date_attribute() {
            Ok(attribute) => attribute,
            Err(e) => {
                warn!("Could not read the selected date attribute: {}", e);
                None
            }
        };
        let date_key = resolve_date_key(attribute.as_deref(), &display_text, index);
        if date_key.source != DateKeySource::Attribute {
            warn!("No machine-readable date for control {}, keying by {:?}", index + 1, date_key.key);
        }

        self.enter(WalkState::Accumulating { index });
        if !ready {
            warn!(
                "Slot list for {} not ready after {}ms, recording it empty",
                date_key.key,
                self.timeouts.slot_ready.as_millis()
            );
            self.report.timed_out.push(date_key.key.clone());
        }
        info!("Completed {}: {} open slots", date_key.key, availability.len());
        if self.report.availability.insert(date_key.key.clone(), availability).is_some() {
            debug!("Date {} was already visited, replacing its slots", date_key.key);
        }

        Ok(())
    }

    fn extract_date(&mut self, index: usize) -> Result<TimeAvailability> {
        self.enter(WalkState::ExtractingDate { index });
        let snapshot = self.page.snapshot()?;
        let (availability, stats) = extract_with_stats(&snapshot);
        debug!(
            "Extracted {} of {} slot entries ({} blocked start times, rejected: {:?})",
            stats.accepted, stats.items, stats.blocked_times, stats.rejected
        );
        Ok(availability)
    }

    fn enter(&mut self, state: WalkState) {
        trace!("{:?} -> {:?}", self.state, state);
        self.state = state;
    }
}

/// Whether the page has moved on to the date at `index` and rendered its slot list
///
/// The previous date's list is still in the DOM right after a click; reading it
/// then would file its slots under this date's key.
fn showing_date<P: BookingPage>(page: &mut P, index: usize) -> Result<bool> {
    match page.selected_date_index()? {
        Some(selected) if selected != index => Ok(false),
        _ => page.slots_ready(),
    }
}

fn millis(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn display_text_or_index(text: &str, index: usize) -> String {
    if text.is_empty() { format!("date {}", index + 1) } else { text.to_string() }
}
