//! Scenario models
//!
//! A scenario is one independent test case: a named sequence of steps.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::step::{HttpStep, UiStep};

/// Whether a scenario talks to the API or drives a browser
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Api,
    Ui,
}

impl ScenarioKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "api" | "http" => Some(ScenarioKind::Api),
            "ui" | "browser" => Some(ScenarioKind::Ui),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Api => "API",
            ScenarioKind::Ui => "UI",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Functional area of the app a scenario covers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Auth,
    Analytics,
    Catalog,
    Payments,
    Signup,
    Account,
    Pages,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Auth => "Auth",
            Category::Analytics => "Analytics",
            Category::Catalog => "Catalog",
            Category::Payments => "Payments",
            Category::Signup => "Signup",
            Category::Account => "Account",
            Category::Pages => "Pages",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
    }

    pub fn all() -> Vec<Category> {
        vec![
            Category::Auth,
            Category::Analytics,
            Category::Catalog,
            Category::Payments,
            Category::Signup,
            Category::Account,
            Category::Pages,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Steps of a scenario, one flavor per runner
#[derive(Clone, Debug)]
pub enum Steps {
    Http(Vec<HttpStep>),
    Ui(Vec<UiStep>),
}

impl Steps {
    pub fn len(&self) -> usize {
        match self {
            Steps::Http(steps) => steps.len(),
            Steps::Ui(steps) => steps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One independent test case
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Catalog id, e.g. `TC002`
    pub id: String,
    pub name: String,
    pub category: Category,
    pub steps: Steps,
    /// Set when the scenario is known to trip over a defect in the app
    pub known_issue: Option<String>,
}

impl Scenario {
    pub fn api(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        steps: Vec<HttpStep>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            steps: Steps::Http(steps),
            known_issue: None,
        }
    }

    pub fn ui(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        steps: Vec<UiStep>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            steps: Steps::Ui(steps),
            known_issue: None,
        }
    }

    pub fn with_known_issue(mut self, note: impl Into<String>) -> Self {
        self.known_issue = Some(note.into());
        self
    }

    pub fn kind(&self) -> ScenarioKind {
        match self.steps {
            Steps::Http(_) => ScenarioKind::Api,
            Steps::Ui(_) => ScenarioKind::Ui,
        }
    }

    /// Numeric part of the id, used for ordering
    pub fn number(&self) -> u32 {
        self.id
            .trim_start_matches(|c: char| !c.is_ascii_digit())
            .parse()
            .unwrap_or(u32::MAX)
    }

    /// Case-insensitive id match, `tc2` and `TC002` included
    pub fn matches_id(&self, id: &str) -> bool {
        if self.id.eq_ignore_ascii_case(id) {
            return true;
        }
        let digits = id.trim_start_matches(|c: char| !c.is_ascii_digit());
        digits.parse::<u32>().map(|n| n == self.number()).unwrap_or(false)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Scenario {
        Scenario::api("TC002", "OTP validation", Category::Auth, Vec::new())
    }

    #[test]
    fn test_scenario_number() {
        assert_eq!(sample().number(), 2);
        assert_eq!(sample().kind(), ScenarioKind::Api);
    }

    #[test]
    fn test_matches_id() {
        let s = sample();
        assert!(s.matches_id("TC002"));
        assert!(s.matches_id("tc002"));
        assert!(s.matches_id("tc2"));
        assert!(s.matches_id("2"));
        assert!(!s.matches_id("TC020"));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(Category::from_str("signup"), Some(Category::Signup));
        assert_eq!(Category::from_str("PAGES"), Some(Category::Pages));
        assert_eq!(Category::from_str("billing"), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(ScenarioKind::from_str("api"), Some(ScenarioKind::Api));
        assert_eq!(ScenarioKind::from_str("Browser"), Some(ScenarioKind::Ui));
        assert_eq!(ScenarioKind::from_str("grpc"), None);
    }
}
