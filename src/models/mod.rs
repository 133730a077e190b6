//! Data models for scenario runs
//!
//! This module contains all data structures used throughout the application.

mod expectation;
mod scenario;
mod step;
mod test_result;

pub use expectation::{Expectation, JsonKind, UiExpectation};
pub use scenario::{Category, Scenario, ScenarioKind, Steps};
pub use step::{HttpStep, Locator, UiStep};
pub use test_result::{RunSummary, ScenarioResult, TestStatus};
