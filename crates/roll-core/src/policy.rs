//! Inclusion policy shared by every credits parser.
//!
//! The policy is plain configuration data: which section labels switch
//! accumulation on or off, which role labels are skipped, which canonical
//! names are non-person entities, and which raw names are aliases of a
//! canonical identity.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Section/role/entity sets and the alias table.
///
/// The three section/role sets are expected to be pairwise disjoint; see
/// `roll_config::RollConfig::validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionPolicy {
    /// Sections whose roles contribute to the dataset.
    #[serde(default)]
    pub included_sections: BTreeSet<String>,

    /// Sections whose roles are skipped (localization, publisher, outsourced).
    #[serde(default)]
    pub excluded_sections: BTreeSet<String>,

    /// Roles skipped regardless of the enclosing section.
    #[serde(default)]
    pub excluded_roles: BTreeSet<String>,

    /// Canonical names that are studios, orchestras, or other non-people.
    #[serde(default)]
    pub excluded_entities: BTreeSet<String>,

    /// Raw cleaned name to canonical name.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl InclusionPolicy {
    #[must_use]
    pub fn is_included_section(&self, label: &str) -> bool {
        self.included_sections.contains(label)
    }

    #[must_use]
    pub fn is_excluded_section(&self, label: &str) -> bool {
        self.excluded_sections.contains(label)
    }

    #[must_use]
    pub fn is_excluded_role(&self, label: &str) -> bool {
        self.excluded_roles.contains(label)
    }

    #[must_use]
    pub fn is_excluded_entity(&self, name: &str) -> bool {
        self.excluded_entities.contains(name)
    }

    /// Canonical name registered for `name`, if it is a known alias.
    #[must_use]
    pub fn alias_for(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Labels present in more than one of the section/role sets.
    ///
    /// Each entry is `(label, first set, second set)`.
    #[must_use]
    pub fn overlapping_labels(&self) -> Vec<(String, &'static str, &'static str)> {
        let sets: [(&'static str, &BTreeSet<String>); 3] = [
            ("included_sections", &self.included_sections),
            ("excluded_sections", &self.excluded_sections),
            ("excluded_roles", &self.excluded_roles),
        ];

        let mut overlaps = Vec::new();
        for (i, (left_name, left)) in sets.iter().enumerate() {
            for (right_name, right) in &sets[i + 1..] {
                for label in left.intersection(right) {
                    overlaps.push((label.clone(), *left_name, *right_name));
                }
            }
        }
        overlaps
    }
}
