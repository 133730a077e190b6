//! Page driver abstraction
//!
//! The UI runner talks to the browser only through [`PageDriver`], one
//! instance per page.

use std::time::Duration;
use thiserror::Error;

use crate::models::Locator;

/// Browser errors
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Navigation to {0} timed out after {1}ms")]
    NavigationTimeout(String, u64),

    #[error("Browser protocol error: {0}")]
    Protocol(String),

    #[error("Unexpected script result: {0}")]
    Script(String),
}

/// Operations the UI runner needs from a page
#[allow(async_fn_in_trait)]
pub trait PageDriver {
    /// Navigate to an absolute URL
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Whether the element exists and is rendered
    async fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError>;

    /// Replace an input's value; `false` when the element is missing
    async fn fill(&self, locator: &Locator, value: &str) -> Result<bool, BrowserError>;

    /// Click an element; `false` when the element is missing
    async fn click(&self, locator: &Locator) -> Result<bool, BrowserError>;

    async fn current_url(&self) -> Result<String, BrowserError>;

    /// Whether the rendered page text contains the string
    async fn has_text(&self, text: &str) -> Result<bool, BrowserError>;
}
