//! Result models for scenario runs
//!
//! Defines scenario results, status types and the run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::scenario::{Category, Scenario, ScenarioKind};

/// Scenario execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
            TestStatus::Skip => "○",
            TestStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TestStatus::Fail | TestStatus::Error)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Skip => write!(f, "SKIP"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single scenario execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_id: String,
    pub name: String,
    pub kind: ScenarioKind,
    pub category: Category,
    pub status: TestStatus,
    pub duration_ms: u64,
    /// Steps that completed before the scenario ended
    pub steps_run: usize,
    pub message: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl ScenarioResult {
    fn with_status(scenario: &Scenario, status: TestStatus, duration_ms: u64) -> Self {
        Self {
            scenario_id: scenario.id.clone(),
            name: scenario.name.clone(),
            kind: scenario.kind(),
            category: scenario.category,
            status,
            duration_ms,
            steps_run: 0,
            message: None,
            details: None,
        }
    }

    pub fn pass(scenario: &Scenario, duration_ms: u64) -> Self {
        Self::with_status(scenario, TestStatus::Pass, duration_ms)
    }

    pub fn fail(scenario: &Scenario, duration_ms: u64, message: impl Into<String>) -> Self {
        Self::with_status(scenario, TestStatus::Fail, duration_ms).with_message(message)
    }

    pub fn skip(scenario: &Scenario, reason: impl Into<String>) -> Self {
        Self::with_status(scenario, TestStatus::Skip, 0).with_message(reason)
    }

    pub fn error(scenario: &Scenario, duration_ms: u64, error: impl Into<String>) -> Self {
        Self::with_status(scenario, TestStatus::Error, duration_ms).with_message(error)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_steps_run(mut self, steps_run: usize) -> Self {
        self.steps_run = steps_run;
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} [{}ms]",
            self.status.symbol(),
            self.scenario_id,
            self.name,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of one run over a set of scenarios
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl RunSummary {
    pub fn new(
        base_url: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<ScenarioResult>,
    ) -> Self {
        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();

        Self {
            base_url: base_url.into(),
            started_at,
            total: results.len(),
            passed: results.iter().filter(|r| r.status.is_success()).count(),
            failed: count(TestStatus::Fail),
            skipped: count(TestStatus::Skip),
            errors: count(TestStatus::Error),
            total_duration_ms: results.iter().map(|r| r.duration_ms).sum(),
            results,
        }
    }

    /// Pass rate over scenarios that actually ran
    pub fn pass_rate(&self) -> f64 {
        let ran = self.total - self.skipped;
        if ran == 0 {
            0.0
        } else {
            (self.passed as f64 / ran as f64) * 100.0
        }
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.status.is_failure())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run against {} ({})", self.base_url, self.started_at.to_rfc3339())?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Skip: {} | Error: {}",
            self.total, self.passed, self.failed, self.skipped, self.errors
        )?;
        writeln!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}
