//! Scenario execution engine
//!
//! Runs HTTP and browser scenarios step by step, failing fast on the first
//! step that does not hold.

mod http_runner;
mod runner;
#[cfg(test)]
mod testing;
mod ui_runner;
mod vars;

pub use runner::ScenarioRunner;

use std::fmt;
use thiserror::Error;

use crate::assertions::AssertionFailure;
use crate::browser::BrowserError;
use vars::TemplateError;

/// Why a single step stopped its scenario
#[derive(Error, Debug)]
pub enum StepError {
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("{0}")]
    Http(anyhow::Error),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// The step a scenario stopped at, and why
#[derive(Debug)]
pub struct StepFailure {
    /// Zero-based step index
    pub index: usize,
    pub step: String,
    pub error: StepError,
    /// Observed state when the step failed (response, page URL)
    pub details: Option<serde_json::Value>,
}

impl StepFailure {
    pub fn new(index: usize, step: impl fmt::Display, error: impl Into<StepError>) -> Self {
        Self {
            index,
            step: step.to_string(),
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Mismatches fail a scenario; everything else is an error
    pub fn is_assertion(&self) -> bool {
        matches!(self.error, StepError::Assertion(_))
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({}): {}", self.index + 1, self.step, self.error)
    }
}

/// Number of steps run, or the step that stopped the scenario
pub type StepsOutcome = Result<usize, StepFailure>;
