//! Browser session management
//!
//! - [`BrowserSession`]: launches or attaches to Chrome and owns the crawl tab
//! - [`TabPage`]: the booking page operations the crawl needs, run against that tab
//! - [`LaunchOptions`] / [`ConnectionOptions`]: how the browser is obtained

pub mod config;
pub mod page;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use page::TabPage;
pub use session::BrowserSession;
