use crate::error::Result;
use crate::model::RawSnapshot;

/// The booking page as the date-picker walker sees it
///
/// Every call queries the live page. Date controls are addressed by index and
/// re-enumerated on each call, because the venue re-renders the control list
/// after each activation and element handles from before are stale.
///
/// Methods take `&mut self`: one crawl owns the page for its whole duration.
pub trait BookingPage {
    /// Whether the date-selector list is in the document
    fn date_picker_present(&mut self) -> Result<bool>;

    /// Number of date controls currently rendered
    fn date_control_count(&mut self) -> Result<usize>;

    /// Trimmed display text of the date control at `index`
    fn date_control_text(&mut self, index: usize) -> Result<String>;

    /// Click the date control at `index`
    fn activate_date_control(&mut self, index: usize) -> Result<()>;

    /// Tag the slot entries rendered right now, so the list shown for the
    /// next date can be told apart from them
    fn mark_slots_stale(&mut self) -> Result<()>;

    /// Whether the slot list has at least one entry, the first entry's time
    /// text is non-empty, and that entry is not still one tagged by
    /// [`BookingPage::mark_slots_stale`]
    fn slots_ready(&mut self) -> Result<bool>;

    /// Position of the control the picker shows as selected, `None` if the page does not say
    fn selected_date_index(&mut self) -> Result<Option<usize>>;

    /// Capture every slot entry and unavailable range of the displayed date in one pass
    fn snapshot(&mut self) -> Result<RawSnapshot>;

    /// Raw `datetime` attribute of the selected date control, `None` if absent or blank
    fn selected_date_attribute(&mut self) -> Result<Option<String>>;
}

impl<P: BookingPage + ?Sized> BookingPage for &mut P {
    fn date_picker_present(&mut self) -> Result<bool> {
        (**self).date_picker_present()
    }

    fn date_control_count(&mut self) -> Result<usize> {
        (**self).date_control_count()
    }

    fn date_control_text(&mut self, index: usize) -> Result<String> {
        (**self).date_control_text(index)
    }

    fn activate_date_control(&mut self, index: usize) -> Result<()> {
        (**self).activate_date_control(index)
    }

    fn mark_slots_stale(&mut self) -> Result<()> {
        (**self).mark_slots_stale()
    }

    fn slots_ready(&mut self) -> Result<bool> {
        (**self).slots_ready()
    }

    fn selected_date_index(&mut self) -> Result<Option<usize>> {
        (**self).selected_date_index()
    }

    fn snapshot(&mut self) -> Result<RawSnapshot> {
        (**self).snapshot()
    }

    fn selected_date_attribute(&mut self) -> Result<Option<String>> {
        (**self).selected_date_attribute()
    }
}
