//! Browser automation module
//!
//! Drives headless Chromium for UI scenarios.

mod driver;
mod locator;
mod session;

pub use driver::{BrowserError, PageDriver};
pub use session::BrowserSession;
