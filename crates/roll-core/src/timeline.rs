//! The unified contributor timeline.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Release id to roles held in that release, in insertion order.
pub type ReleaseRoles = IndexMap<String, Vec<String>>;

/// Canonical contributor name to their per-release roles.
///
/// Contributors are kept sorted by name. Each contributor's releases keep the
/// order they were recorded in, which the aggregator makes chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ContributionTimeline {
    contributors: BTreeMap<String, ReleaseRoles>,
}

impl ContributionTimeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `role` to `contributor`'s role list for `release`.
    pub fn record(&mut self, contributor: &str, release: &str, role: &str) {
        self.contributors
            .entry(contributor.to_string())
            .or_default()
            .entry(release.to_string())
            .or_default()
            .push(role.to_string());
    }

    /// Releases and roles for one contributor.
    #[must_use]
    pub fn get(&self, contributor: &str) -> Option<&ReleaseRoles> {
        self.contributors.get(contributor)
    }

    /// Contributors in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ReleaseRoles)> {
        self.contributors.iter()
    }

    /// Distinct release ids across all contributors.
    #[must_use]
    pub fn release_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .contributors
            .values()
            .flat_map(|releases| releases.keys().map(String::as_str))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn record_appends_in_order() {
        let mut timeline = ContributionTimeline::new();
        timeline.record("Alice", "r1", "Programming");
        timeline.record("Alice", "r1", "Tools");
        timeline.record("Alice", "r2", "Lead Programmer");

        let releases = timeline.get("Alice").expect("alice recorded");
        let keys: Vec<&str> = releases.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["r1", "r2"]);
        assert_eq!(releases["r1"], vec!["Programming", "Tools"]);
    }

    #[test]
    fn contributors_iterate_sorted() {
        let mut timeline = ContributionTimeline::new();
        timeline.record("Zed", "r1", "Art");
        timeline.record("Alice", "r1", "Art");

        let names: Vec<&str> = timeline.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Zed"]);
        assert_eq!(timeline.release_ids(), vec!["r1"]);
    }

    #[test]
    fn serializes_as_nested_object() {
        let mut timeline = ContributionTimeline::new();
        timeline.record("Alice Smith", "r1", "Programming");

        let value = serde_json::to_value(&timeline).expect("serialize timeline");
        assert_eq!(
            value,
            serde_json::json!({ "Alice Smith": { "r1": ["Programming"] } })
        );
    }
}
