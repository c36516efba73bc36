//! Release metadata and the chronological release catalog.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Static descriptor for one release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReleaseMetadata {
    /// Release identifier, matching the credits directory name.
    pub id: String,
    /// Chronological position, 0 for the earliest release.
    pub index: u32,
    /// Display label (e.g. `Rome (2004)`).
    pub label: String,
    /// Node color for flow diagrams (CSS color string).
    #[serde(default)]
    pub color: String,
    /// Horizontal layout position in `[0, 1]`.
    #[serde(default)]
    pub x: f64,
    /// Vertical layout position in `[0, 1]`.
    #[serde(default)]
    pub y: f64,
    /// Marks the "no next release" node that transitions end at.
    #[serde(default)]
    pub terminal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_y: Option<f64>,
}

/// Releases ordered by chronological index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseCatalog {
    releases: Vec<ReleaseMetadata>,
}

impl ReleaseCatalog {
    /// Build a catalog, rejecting duplicate ids, duplicate indices, and more
    /// than one terminal entry.
    ///
    /// # Errors
    /// Returns [`CoreError::Validation`] naming the offending entry.
    pub fn new(mut releases: Vec<ReleaseMetadata>) -> Result<Self, CoreError> {
        let mut ids = HashSet::new();
        let mut indices = HashSet::new();
        let mut terminal: Option<&str> = None;

        for release in &releases {
            if !ids.insert(release.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate release id '{}'",
                    release.id
                )));
            }
            if !indices.insert(release.index) {
                return Err(CoreError::Validation(format!(
                    "duplicate release index {} (release '{}')",
                    release.index, release.id
                )));
            }
            if release.terminal {
                if let Some(previous) = terminal {
                    return Err(CoreError::Validation(format!(
                        "more than one terminal release ('{previous}' and '{}')",
                        release.id
                    )));
                }
                terminal = Some(release.id.as_str());
            }
        }

        releases.sort_by_key(|release| release.index);
        Ok(Self { releases })
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ReleaseMetadata> {
        self.releases.iter().find(|release| release.id == id)
    }

    /// Chronological index of `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<u32> {
        self.get(id).map(|release| release.index)
    }

    /// The "no next release" entry, if configured.
    #[must_use]
    pub fn terminal(&self) -> Option<&ReleaseMetadata> {
        self.releases.iter().find(|release| release.terminal)
    }

    /// Sort key placing catalogued releases by index and unknown ones after
    /// them in id order.
    #[must_use]
    pub fn chronological_key<'a>(&self, id: &'a str) -> (u32, &'a str) {
        (self.index_of(id).unwrap_or(u32::MAX), id)
    }

    /// All entries in chronological order, terminal entry included.
    pub fn iter(&self) -> impl Iterator<Item = &ReleaseMetadata> {
        self.releases.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}
