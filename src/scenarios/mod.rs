//! Scenario catalog
//!
//! Every scenario the runner knows about, plus selection by id, kind and
//! category.

mod api;
mod ui;

use crate::models::{Category, Scenario, ScenarioKind};

/// All scenarios, ordered by id
pub fn all() -> Vec<Scenario> {
    let mut scenarios = api::scenarios();
    scenarios.extend(ui::scenarios());
    scenarios.sort_by_key(|s| s.number());
    scenarios
}

/// Look up one scenario by id
pub fn find(id: &str) -> Option<Scenario> {
    all().into_iter().find(|s| s.matches_id(id))
}

/// Scenario filter; unset fields match everything
#[derive(Clone, Debug, Default)]
pub struct Selection {
    /// `None` selects every id, `Some(empty)` selects none
    pub ids: Option<Vec<String>>,
    pub kind: Option<ScenarioKind>,
    pub category: Option<Category>,
    pub skip: Vec<String>,
}

impl Selection {
    /// Selection of explicit ids; an empty list selects every id
    pub fn with_ids(ids: Vec<String>) -> Self {
        Self {
            ids: (!ids.is_empty()).then_some(ids),
            ..Default::default()
        }
    }

    pub fn matches(&self, scenario: &Scenario) -> bool {
        if let Some(ids) = &self.ids {
            if !ids.iter().any(|id| scenario.matches_id(id)) {
                return false;
            }
        }
        if self.kind.is_some_and(|kind| scenario.kind() != kind) {
            return false;
        }
        if self.category.is_some_and(|category| scenario.category != category) {
            return false;
        }
        !self.skip.iter().any(|id| scenario.matches_id(id))
    }

    /// Narrow a profile's selection with command-line filters
    pub fn narrowed_by(mut self, other: Selection) -> Selection {
        self.ids = match (self.ids, other.ids) {
            (Some(own), Some(theirs)) => Some(
                theirs
                    .into_iter()
                    .filter(|id| own.iter().any(|o| same_scenario(o, id)))
                    .collect(),
            ),
            (own, theirs) => theirs.or(own),
        };
        self.kind = other.kind.or(self.kind);
        self.category = other.category.or(self.category);
        self.skip.extend(other.skip);
        self
    }
}

fn same_scenario(a: &str, b: &str) -> bool {
    match (find(a), find(b)) {
        (Some(x), Some(y)) => x.id == y.id,
        _ => a.eq_ignore_ascii_case(b),
    }
}

/// Scenarios passing the selection, ordered by id
pub fn select(selection: &Selection) -> Vec<Scenario> {
    all().into_iter().filter(|s| selection.matches(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let scenarios = all();
        let ids: HashSet<_> = scenarios.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), scenarios.len());
    }

    #[test]
    fn test_catalog_is_ordered() {
        let numbers: Vec<u32> = all().iter().map(|s| s.number()).collect();
        let mut sorted = numbers.clone();
        sorted.sort();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn test_every_scenario_has_steps() {
        for scenario in all() {
            assert!(!scenario.steps.is_empty(), "{} has no steps", scenario.id);
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("tc2").unwrap().id, "TC002");
        assert!(find("TC999").is_none());
    }

    #[test]
    fn test_select_by_kind_and_skip() {
        let selection = Selection {
            kind: Some(ScenarioKind::Api),
            skip: vec!["TC002".to_string()],
            ..Default::default()
        };
        let ids: Vec<String> = select(&selection).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["TC001", "TC003", "TC004", "TC005"]);
    }

    #[test]
    fn test_select_by_category() {
        let selection = Selection {
            category: Some(Category::Pages),
            ..Default::default()
        };
        let selected = select(&selection);
        assert!(!selected.is_empty());
        assert!(selected.iter().all(|s| s.kind() == ScenarioKind::Ui));
    }

    #[test]
    fn test_narrowed_by_intersects_ids() {
        let profile = Selection::with_ids(vec!["TC001".into(), "TC004".into(), "TC020".into()]);
        let cli = Selection::with_ids(vec!["tc4".into(), "TC005".into()]);
        let ids: Vec<String> = select(&profile.narrowed_by(cli))
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["TC004"]);
    }

    #[test]
    fn test_narrowed_by_disjoint_ids_selects_nothing() {
        let profile = Selection::with_ids(vec!["TC001".into()]);
        let cli = Selection::with_ids(vec!["TC002".into()]);
        assert!(select(&profile.narrowed_by(cli)).is_empty());
    }

    #[test]
    fn test_narrowed_by_keeps_profile_ids() {
        let profile = Selection::with_ids(vec!["TC001".into()]);
        let narrowed = profile.narrowed_by(Selection::default());
        assert_eq!(narrowed.ids, Some(vec!["TC001".to_string()]));
        assert!(Selection::with_ids(Vec::new()).ids.is_none());
    }

    #[test]
    fn test_narrowed_by_overrides_kind() {
        let profile = Selection {
            kind: Some(ScenarioKind::Api),
            ..Default::default()
        };
        let cli = Selection {
            kind: Some(ScenarioKind::Ui),
            skip: vec!["TC020".into()],
            ..Default::default()
        };
        let narrowed = profile.narrowed_by(cli);
        assert_eq!(narrowed.kind, Some(ScenarioKind::Ui));
        assert_eq!(narrowed.skip, vec!["TC020"]);
    }
}
