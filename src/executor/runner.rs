//! Scenario runner
//!
//! Runs a selection of scenarios one after another and collects a
//! [`RunSummary`]. The browser is launched on the first UI scenario and
//! shared by the rest of the run.

use anyhow::Result;
use chrono::Utc;
use tracing::{error, info, warn};

use super::http_runner::HttpScenarioRunner;
use super::ui_runner::{UiScenarioRunner, UiTiming};
use super::{StepFailure, StepsOutcome};
use crate::browser::{BrowserSession, PageDriver};
use crate::config::AppConfig;
use crate::http::HttpClient;
use crate::models::{HttpStep, RunSummary, Scenario, ScenarioResult, Steps, UiStep};
use crate::utils::timer::Timer;

/// Runner for one invocation
pub struct ScenarioRunner {
    config: AppConfig,
    client: HttpClient,
    browser: Option<BrowserSession>,
    launch_error: Option<String>,
}

impl ScenarioRunner {
    /// Create a new runner
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = HttpClient::with_timeout(&config.base_url, config.timeout_secs)?;
        Ok(Self {
            config,
            client,
            browser: None,
            launch_error: None,
        })
    }

    /// Run a single scenario
    pub async fn run_scenario(&mut self, scenario: &Scenario) -> ScenarioResult {
        if let Some(note) = &scenario.known_issue {
            if !self.config.include_known_issues {
                return ScenarioResult::skip(scenario, format!("Known issue: {note}"));
            }
        }

        if scenario.steps.is_empty() {
            return ScenarioResult::skip(scenario, "No steps");
        }

        info!("Running {}", scenario);
        let timer = Timer::start(&scenario.id);

        let outcome = match &scenario.steps {
            Steps::Http(steps) => self.run_http(steps).await,
            Steps::Ui(steps) => match self.run_ui(steps).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("{} could not start the browser: {}", scenario.id, e);
                    return ScenarioResult::error(scenario, timer.elapsed_ms(), e);
                }
            },
        };

        let duration_ms = timer.stop().as_millis() as u64;
        to_result(scenario, duration_ms, outcome)
    }

    /// Run scenarios sequentially
    pub async fn run_all(&mut self, scenarios: &[Scenario]) -> RunSummary {
        info!(
            "Running {} scenarios against {}",
            scenarios.len(),
            self.config.base_url
        );

        let started_at = Utc::now();
        let timer = Timer::start("run");
        let mut results = Vec::with_capacity(scenarios.len());

        for scenario in scenarios {
            let result = self.run_scenario(scenario).await;
            info!("  {}", result);
            results.push(result);
        }

        let summary = RunSummary::new(&self.config.base_url, started_at, results);

        info!(
            "Run completed in {}ms - Pass: {}/{} ({:.1}%)",
            timer.elapsed_ms(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }

    /// Close the browser if one was launched
    pub async fn shutdown(mut self) {
        if let Some(browser) = self.browser.take() {
            browser.close().await;
        }
    }

    async fn run_http(&self, steps: &[HttpStep]) -> StepsOutcome {
        HttpScenarioRunner::new(&self.client, &self.config.test_secret)
            .run(steps)
            .await
    }

    /// Outer error means no page could be opened
    async fn run_ui(&mut self, steps: &[UiStep]) -> Result<StepsOutcome, String> {
        if let Some(reason) = &self.launch_error {
            return Err(reason.clone());
        }

        if self.browser.is_none() {
            match BrowserSession::launch(&self.config.browser).await {
                Ok(browser) => self.browser = Some(browser),
                Err(e) => {
                    warn!("Browser unavailable, remaining UI scenarios will error");
                    self.launch_error = Some(e.to_string());
                    return Err(e.to_string());
                }
            }
        }

        let Some(browser) = &self.browser else {
            return Err("browser not running".to_string());
        };
        let page = browser.new_page().await.map_err(|e| e.to_string())?;

        let outcome = run_ui_on(&page, &self.config, steps).await;
        page.close().await;
        Ok(outcome)
    }
}

async fn run_ui_on<D: PageDriver>(page: &D, config: &AppConfig, steps: &[UiStep]) -> StepsOutcome {
    let timing = UiTiming::from(&config.browser);
    UiScenarioRunner::new(page, &config.base_url, timing)
        .run(steps)
        .await
}

fn to_result(scenario: &Scenario, duration_ms: u64, outcome: StepsOutcome) -> ScenarioResult {
    match outcome {
        Ok(steps_run) => ScenarioResult::pass(scenario, duration_ms).with_steps_run(steps_run),
        Err(failure) => {
            let StepFailure {
                index, details, ..
            } = &failure;
            let mut result = if failure.is_assertion() {
                ScenarioResult::fail(scenario, duration_ms, failure.to_string())
            } else {
                ScenarioResult::error(scenario, duration_ms, failure.to_string())
            };
            result = result.with_steps_run(*index);
            if let Some(details) = details {
                result = result.with_details(details.clone());
            }
            result
        }
    }
}
