//! Parsed credits for a single release.
//!
//! Parsers never hand out mutable contributor sets. They accumulate into a
//! [`CreditsBuilder`] and call [`CreditsBuilder::finish`], which freezes every
//! role into a sorted, deduplicated name list.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::policy::InclusionPolicy;

/// Role name to sorted contributor names, in first-seen role order.
///
/// This is the persisted shape of a `<release>_credits.json` record.
pub type RoleMap = IndexMap<String, Vec<String>>;

/// One release's parsed credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreditsDocument {
    /// Release identifier (e.g. `2004_rome`).
    pub release: String,
    /// Role name to sorted canonical contributor names.
    pub roles: RoleMap,
}

impl CreditsDocument {
    /// An empty document for `release`.
    #[must_use]
    pub fn empty(release: impl Into<String>) -> Self {
        Self {
            release: release.into(),
            roles: RoleMap::new(),
        }
    }

    /// Rebuild a document from a persisted role map.
    ///
    /// Names are re-sorted and deduplicated; empty names and empty roles are
    /// dropped so the document invariants hold whatever the file contained.
    #[must_use]
    pub fn from_role_map(release: impl Into<String>, roles: RoleMap) -> Self {
        let mut builder = CreditsBuilder::new(release);
        for (role, names) in roles {
            for name in names {
                builder.add(&role, name);
            }
        }
        builder.finish()
    }

    /// Build a document from a hand-entered credit set.
    ///
    /// Hand-entered sets are already canonical, so only excluded roles are
    /// dropped before sorting.
    #[must_use]
    pub fn from_hand_entered(
        release: impl Into<String>,
        roles: RoleMap,
        policy: &InclusionPolicy,
    ) -> Self {
        let roles = roles
            .into_iter()
            .filter(|(role, _)| !policy.is_excluded_role(role))
            .collect();
        Self::from_role_map(release, roles)
    }

    /// Number of roles in the document.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Number of distinct contributors across all roles.
    #[must_use]
    pub fn contributor_count(&self) -> usize {
        self.roles
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Contributors listed under `role`, if the role is present.
    #[must_use]
    pub fn contributors(&self, role: &str) -> Option<&[String]> {
        self.roles.get(role).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Mutable accumulator for one release's credits.
#[derive(Debug, Clone)]
pub struct CreditsBuilder {
    release: String,
    roles: IndexMap<String, BTreeSet<String>>,
}

impl CreditsBuilder {
    #[must_use]
    pub fn new(release: impl Into<String>) -> Self {
        Self {
            release: release.into(),
            roles: IndexMap::new(),
        }
    }

    /// Release this builder accumulates for.
    #[must_use]
    pub fn release(&self) -> &str {
        &self.release
    }

    /// Add `name` under `role`, creating the role on first use.
    ///
    /// Empty names are ignored. Returns `true` if the name was new for the role.
    pub fn add(&mut self, role: &str, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        if let Some(names) = self.roles.get_mut(role) {
            return names.insert(name);
        }
        self.roles
            .entry(role.to_string())
            .or_default()
            .insert(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Freeze into an immutable document with sorted contributor lists.
    #[must_use]
    pub fn finish(self) -> CreditsDocument {
        let roles = self
            .roles
            .into_iter()
            .filter(|(_, names)| !names.is_empty())
            .map(|(role, names)| (role, names.into_iter().collect()))
            .collect();
        CreditsDocument {
            release: self.release,
            roles,
        }
    }
}
