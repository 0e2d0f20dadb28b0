use court_availability::{BrowserSession, CrawlConfig, DatePickerWalker, LaunchOptions, crawl_availability};

/// A stand-in booking page: two dates, slot lists rendered a moment after each click
const BOOKING_PAGE: &str = r#"<html><body>
<ol class="BookingDatePicker_days-list">
  <li class="BookingDatePicker_days-list-item"><button><time datetime="2025-03-01">Sat 1</time></button></li>
  <li class="BookingDatePicker_days-list-item"><button><time datetime="1740891600000">Sun 2</time></button></li>
</ol>
<ol class="BookingItemPicker_sessions-list"></ol>
<script>
const days = {
  0: `<li><div class="sessions-list-item-time"><time>5:00pm</time></div><div class="sessions-list-item-info-tables">2 open courts</div></li>
      <li><div class="sessions-list-item-time"><time>5:30pm</time></div><div class="sessions-list-item-info-tables">1 open court</div></li>
      <li><div class="unavailable-card"><div class="unavailable-card__time">6:00pm - 7:00pm</div></div></li>
      <li><div class="sessions-list-item-time"><time>6:00pm</time></div><div class="sessions-list-item-info-tables">3 open courts</div></li>`,
  1: `<li><div class="sessions-list-item-time"><time>9:00am</time></div><div class="sessions-list-item-info-tables">1 open court</div></li>`,
};
const items = document.querySelectorAll('ol li.BookingDatePicker_days-list-item');
document.querySelectorAll('ol li button').forEach((button, index) => {
  button.addEventListener('click', () => {
    items.forEach((li) => li.classList.remove('BookingDatePicker_days-list-item--selected'));
    items[index].classList.add('BookingDatePicker_days-list-item--selected');
    const list = document.querySelector('ol.BookingItemPicker_sessions-list');
    list.innerHTML = '';
    setTimeout(() => { list.innerHTML = days[index]; }, 100);
  });
});
</script>
</body></html>"#;

fn booking_url() -> String {
    format!("data:text/html,{}", urlencoding::encode(BOOKING_PAGE))
}

fn config() -> CrawlConfig {
    CrawlConfig::new().booking_url(booking_url()).navigation_timeout_ms(5_000).slot_ready_timeout_ms(2_000)
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_crawl_simulated_booking_page() {
    let report = crawl_availability(&config(), LaunchOptions::new().headless(true)).expect("crawl failed");

    let keys: Vec<&str> = report.availability.keys().map(String::as_str).collect();
    assert_eq!(keys, ["2025-03-01", "2025-03-02"]);

    // 5:30pm is a half hour and 6:00pm is claimed by the unavailable card
    let first: Vec<(&str, u32)> = report.availability["2025-03-01"].iter().map(|(t, c)| (t.as_str(), *c)).collect();
    assert_eq!(first, [("5:00pm", 2)]);
    assert_eq!(report.availability["2025-03-02"]["9:00am"], 1);
    assert!(report.is_complete());
}

#[test]
#[ignore]
fn test_walker_over_live_tab() {
    let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
    let page = session.open_booking_page(&config()).expect("Failed to open booking page");

    let report = DatePickerWalker::new(page, config().timeouts()).run().expect("walk failed");
    assert_eq!(report.availability.len(), 2);
}

#[test]
#[ignore]
fn test_date_picker_missing_is_timeout() {
    let config = CrawlConfig::new()
        .booking_url("data:text/html,<html><body><p>Closed</p></body></html>")
        .navigation_timeout_ms(500);

    let err = crawl_availability(&config, LaunchOptions::new().headless(true)).unwrap_err();
    assert!(err.is_structural());
    assert!(err.to_string().contains("date picker"));
}
