//! Headless Chromium session over the DevTools protocol

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::driver::{BrowserError, PageDriver};
use super::locator;
use crate::config::BrowserSettings;
use crate::models::Locator;

/// A running browser process plus its protocol handler task
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch Chromium with the configured window and flags
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, BrowserError> {
        let mut builder = BrowserConfig::builder()
            .window_size(settings.window_width, settings.window_height)
            .request_timeout(Duration::from_millis(settings.navigation_timeout_ms))
            .arg("--disable-dev-shm-usage");

        if !settings.headless {
            builder = builder.with_head();
        }
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        for arg in &settings.extra_args {
            builder = builder.arg(arg.as_str());
        }

        let config = builder.build().map_err(BrowserError::Launch)?;

        info!(
            "Launching browser ({}, {}x{})",
            if settings.headless { "headless" } else { "headed" },
            settings.window_width,
            settings.window_height
        );

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        });

        Ok(Self { browser, handler })
    }

    /// Open a fresh blank page
    pub async fn new_page(&self) -> Result<CdpPage, BrowserError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?;
        Ok(CdpPage { page })
    }

    /// Close the browser and stop the handler task
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Browser process wait failed: {}", e);
        }
        self.handler.abort();
    }
}

/// One browser tab
pub struct CdpPage {
    page: Page,
}

impl CdpPage {
    async fn eval<T: DeserializeOwned>(&self, script: String) -> Result<T, BrowserError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?
            .into_value::<T>()
            .map_err(|e| BrowserError::Script(e.to_string()))
    }

    pub async fn close(self) {
        if let Err(e) = self.page.close().await {
            debug!("Failed to close page: {}", e);
        }
    }
}

impl PageDriver for CdpPage {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(BrowserError::NavigationTimeout(
                url.to_string(),
                timeout.as_millis() as u64,
            )),
        }
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError> {
        self.eval(locator::visible_script(locator)).await
    }

    async fn fill(&self, locator: &Locator, value: &str) -> Result<bool, BrowserError> {
        self.eval(locator::fill_script(locator, value)).await
    }

    async fn click(&self, locator: &Locator) -> Result<bool, BrowserError> {
        self.eval(locator::click_script(locator)).await
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?;
        Ok(url.unwrap_or_default())
    }

    async fn has_text(&self, text: &str) -> Result<bool, BrowserError> {
        self.eval(locator::text_present_script(text)).await
    }
}
