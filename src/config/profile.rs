//! Scenario profiles
//!
//! Named scenario selections, predefined or declared in the config file.

use serde::{Deserialize, Serialize};

use crate::models::{Category, ScenarioKind};
use crate::scenarios::Selection;

/// A named set of scenarios
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScenarioProfile {
    /// Profile name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Scenario ids; empty means every scenario passing the filters
    #[serde(default)]
    pub scenarios: Vec<String>,
    /// Restrict to one kind
    #[serde(default)]
    pub kind: Option<ScenarioKind>,
    /// Restrict to one category
    #[serde(default)]
    pub category: Option<Category>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ScenarioProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Every scenario
    pub fn all() -> Self {
        Self::new("all").with_description("Every scenario in the catalog")
    }

    /// Fast health pass over the API and public pages
    pub fn smoke() -> Self {
        Self::new("smoke")
            .with_description("Sync, catalog and public page checks")
            .with_scenarios(&["TC001", "TC004", "TC020", "TC021"])
            .with_tag("quick")
    }

    /// API scenarios only
    pub fn api() -> Self {
        let mut profile = Self::new("api").with_description("All API scenarios");
        profile.kind = Some(ScenarioKind::Api);
        profile
    }

    /// Browser scenarios only
    pub fn ui() -> Self {
        let mut profile = Self::new("ui").with_description("All browser scenarios");
        profile.kind = Some(ScenarioKind::Ui);
        profile
    }

    /// Sign-up form validation
    pub fn signup() -> Self {
        let mut profile = Self::new("signup").with_description("Sign-up form validation");
        profile.category = Some(Category::Signup);
        profile
    }

    /// Route smoke checks
    pub fn pages() -> Self {
        let mut profile = Self::new("pages").with_description("Public and protected routes render");
        profile.category = Some(Category::Pages);
        profile
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_scenarios(mut self, ids: &[&str]) -> Self {
        self.scenarios = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Selection equivalent to this profile
    pub fn selection(&self) -> Selection {
        Selection {
            kind: self.kind,
            category: self.category,
            ..Selection::with_ids(self.scenarios.clone())
        }
    }

    /// Get all predefined profiles
    pub fn predefined() -> Vec<ScenarioProfile> {
        vec![
            Self::all(),
            Self::smoke(),
            Self::api(),
            Self::ui(),
            Self::signup(),
            Self::pages(),
        ]
    }

    /// Find predefined profile by name
    pub fn find(name: &str) -> Option<ScenarioProfile> {
        Self::predefined()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}
