//! Browser scenario runner
//!
//! Walks UI steps against one page. Element actions wait a fixed delay, then
//! poll for the element until the action timeout runs out.

use serde_json::json;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

use super::vars::Variables;
use super::{StepError, StepFailure, StepsOutcome};
use crate::assertions::{check_url_contains, AssertionFailure};
use crate::browser::PageDriver;
use crate::config::BrowserSettings;
use crate::models::{Locator, UiExpectation, UiStep};

/// Waits and timeouts applied to UI steps
#[derive(Clone, Copy, Debug)]
pub struct UiTiming {
    pub action_delay: Duration,
    pub action_timeout: Duration,
    pub navigation_timeout: Duration,
    pub assertion_timeout: Duration,
    pub poll_interval: Duration,
}

impl From<&BrowserSettings> for UiTiming {
    fn from(settings: &BrowserSettings) -> Self {
        Self {
            action_delay: Duration::from_millis(settings.action_delay_ms),
            action_timeout: Duration::from_millis(settings.action_timeout_ms),
            navigation_timeout: Duration::from_millis(settings.navigation_timeout_ms),
            assertion_timeout: Duration::from_millis(settings.assertion_timeout_ms),
            poll_interval: Duration::from_millis(settings.poll_interval_ms.max(1)),
        }
    }
}

/// Runs the UI steps of one scenario on a single page
pub struct UiScenarioRunner<'a, D: PageDriver> {
    page: &'a D,
    base_url: &'a str,
    timing: UiTiming,
}

impl<'a, D: PageDriver> UiScenarioRunner<'a, D> {
    pub fn new(page: &'a D, base_url: &'a str, timing: UiTiming) -> Self {
        Self {
            page,
            base_url,
            timing,
        }
    }

    pub async fn run(&self, steps: &[UiStep]) -> StepsOutcome {
        let vars = Variables::new();
        for (index, step) in steps.iter().enumerate() {
            debug!("UI step {}: {}", index + 1, step);
            if let Err(error) = self.run_step(step, &vars).await {
                let mut failure = StepFailure::new(index, step, error);
                if let Ok(url) = self.page.current_url().await {
                    failure = failure.with_details(json!({ "url": url }));
                }
                return Err(failure);
            }
        }
        Ok(steps.len())
    }

    async fn run_step(&self, step: &UiStep, vars: &Variables) -> Result<(), StepError> {
        match step {
            UiStep::Goto(path) => {
                let url = self.url_for(&vars.render(path)?);
                self.page.goto(&url, self.timing.navigation_timeout).await?;
            }
            UiStep::Fill(locator, value) => {
                let value = vars.render(value)?;
                self.await_element(locator).await?;
                if !self.page.fill(locator, &value).await? {
                    return Err(missing(locator, self.timing.action_timeout).into());
                }
            }
            UiStep::Click(locator) => {
                self.await_element(locator).await?;
                if !self.page.click(locator).await? {
                    return Err(missing(locator, self.timing.action_timeout).into());
                }
            }
            UiStep::ClickIfPresent(locator) => {
                sleep(self.timing.action_delay).await;
                if self
                    .poll_visible(locator, true, self.timing.action_timeout)
                    .await?
                {
                    self.page.click(locator).await?;
                } else {
                    debug!("{} not present, continuing", locator);
                }
            }
            UiStep::Wait(ms) => sleep(Duration::from_millis(*ms)).await,
            UiStep::Expect(expectation) => self.check(expectation).await?,
        }
        Ok(())
    }

    async fn check(&self, expectation: &UiExpectation) -> Result<(), StepError> {
        let timeout = self.timing.assertion_timeout;
        match expectation {
            UiExpectation::Visible(locator) => {
                if !self.poll_visible(locator, true, timeout).await? {
                    return Err(AssertionFailure::new(
                        expectation.to_string(),
                        format!("not visible after {}ms", timeout.as_millis()),
                    )
                    .into());
                }
            }
            UiExpectation::NotVisible(locator) => {
                if !self.poll_visible(locator, false, timeout).await? {
                    return Err(AssertionFailure::new(
                        expectation.to_string(),
                        format!("still visible after {}ms", timeout.as_millis()),
                    )
                    .into());
                }
            }
            UiExpectation::UrlContains(needle) => {
                let url = self.page.current_url().await?;
                check_url_contains(&url, needle)?;
            }
            UiExpectation::TextAbsent(text) => {
                if self.page.has_text(text).await? {
                    return Err(
                        AssertionFailure::new(expectation.to_string(), "text is present").into(),
                    );
                }
            }
        }
        Ok(())
    }

    /// Delay, then wait for the element to show up
    async fn await_element(&self, locator: &Locator) -> Result<(), StepError> {
        sleep(self.timing.action_delay).await;
        if self
            .poll_visible(locator, true, self.timing.action_timeout)
            .await?
        {
            Ok(())
        } else {
            Err(missing(locator, self.timing.action_timeout).into())
        }
    }

    /// Poll until visibility equals `want`; `false` on timeout
    async fn poll_visible(
        &self,
        locator: &Locator,
        want: bool,
        timeout: Duration,
    ) -> Result<bool, StepError> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.is_visible(locator).await? == want {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(self.timing.poll_interval).await;
        }
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }
}

fn missing(locator: &Locator, timeout: Duration) -> AssertionFailure {
    AssertionFailure::new(
        format!("{locator} within {}ms", timeout.as_millis()),
        "element not found or not visible",
    )
}
