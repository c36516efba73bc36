//! Markup dialects and their per-release classification profiles.
//!
//! Neither markup dialect declares which lines are sections, roles, or names.
//! The size-coded dialect relies on font sizes that vary per release, so each
//! release needs a [`SizeCodedProfile`]. The style-coded dialect uses fixed
//! style tags and only needs a [`StyleCodedProfile`] naming where to stop.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MarkupDialect
// ---------------------------------------------------------------------------

/// The two known markup encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupDialect {
    /// Older dialect: structure encoded in the `fontsize` attribute.
    SizeCoded,
    /// Newer dialect: structure encoded in the `style` attribute.
    StyleCoded,
}

impl MarkupDialect {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SizeCoded => "size_coded",
            Self::StyleCoded => "style_coded",
        }
    }
}

impl fmt::Display for MarkupDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MarkupStyle
// ---------------------------------------------------------------------------

/// Style tags understood by the style-coded dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkupStyle {
    Header,
    Subheader,
    Text,
    TextPair,
    Break,
    Image,
}

impl MarkupStyle {
    /// Parse a `style` attribute value. Unknown values return `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "header" => Some(Self::Header),
            "subheader" => Some(Self::Subheader),
            "text" => Some(Self::Text),
            "text_pair" => Some(Self::TextPair),
            "break" => Some(Self::Break),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    /// Header-like tags carry section or role labels.
    #[must_use]
    pub const fn is_heading(self) -> bool {
        matches!(self, Self::Header | Self::Subheader)
    }

    /// Content tags carry contributor names.
    #[must_use]
    pub const fn is_content(self) -> bool {
        matches!(self, Self::Text | Self::TextPair)
    }

    /// Pure formatting tags.
    #[must_use]
    pub const fn is_formatting(self) -> bool {
        matches!(self, Self::Break | Self::Image)
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// A second release whose credits are embedded in another release's document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubReleaseMarker {
    /// Release id the embedded credits belong to.
    pub release: String,
    /// Font size used only by the marker lines that switch releases.
    pub marker_size: String,
    /// Marker text that switches to the embedded release. Any other marker
    /// line switches back to the primary release.
    pub marker_text: String,
}

/// Font-size classification for one size-coded release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeCodedProfile {
    /// Size of contributor name lines.
    pub contributor_size: String,
    /// Size of role lines.
    pub role_size: String,
    /// Size of section lines. Defaults to `role_size`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_size: Option<String>,
    /// Section label after which the rest of the document is skipped.
    pub stop_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_release: Option<SubReleaseMarker>,
}

impl SizeCodedProfile {
    /// Effective section size.
    #[must_use]
    pub fn section_size(&self) -> &str {
        self.section_size.as_deref().unwrap_or(&self.role_size)
    }
}

/// Stop section for one style-coded release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleCodedProfile {
    pub stop_at: String,
}

/// Per-release dialect tables plus classifier overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectProfiles {
    #[serde(default)]
    pub size_coded: BTreeMap<String, SizeCodedProfile>,

    #[serde(default)]
    pub style_coded: BTreeMap<String, StyleCodedProfile>,

    /// Releases whose dialect is fixed instead of detected from the first line.
    #[serde(default)]
    pub overrides: BTreeMap<String, MarkupDialect>,
}

impl DialectProfiles {
    #[must_use]
    pub fn size_coded(&self, release: &str) -> Option<&SizeCodedProfile> {
        self.size_coded.get(release)
    }

    #[must_use]
    pub fn style_coded(&self, release: &str) -> Option<&StyleCodedProfile> {
        self.style_coded.get(release)
    }

    #[must_use]
    pub fn override_for(&self, release: &str) -> Option<MarkupDialect> {
        self.overrides.get(release).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn style_tags_parse_exactly() {
        assert_eq!(MarkupStyle::parse("header"), Some(MarkupStyle::Header));
        assert_eq!(MarkupStyle::parse("text_pair"), Some(MarkupStyle::TextPair));
        assert_eq!(MarkupStyle::parse("Header"), None);
        assert_eq!(MarkupStyle::parse(""), None);
    }

    #[test]
    fn style_groups_do_not_overlap() {
        for style in [
            MarkupStyle::Header,
            MarkupStyle::Subheader,
            MarkupStyle::Text,
            MarkupStyle::TextPair,
            MarkupStyle::Break,
            MarkupStyle::Image,
        ] {
            let groups = [style.is_heading(), style.is_content(), style.is_formatting()];
            assert_eq!(groups.iter().filter(|g| **g).count(), 1, "{style:?}");
        }
    }

    #[test]
    fn section_size_defaults_to_role_size() {
        let mut profile = SizeCodedProfile {
            contributor_size: "18".into(),
            role_size: "22".into(),
            section_size: None,
            stop_at: "SEGA".into(),
            sub_release: None,
        };
        assert_eq!(profile.section_size(), "22");

        profile.section_size = Some("24".into());
        assert_eq!(profile.section_size(), "24");
    }

    #[test]
    fn dialect_serializes_snake_case() {
        let json = serde_json::to_string(&MarkupDialect::SizeCoded).expect("serialize");
        assert_eq!(json, "\"size_coded\"");
        assert_eq!(MarkupDialect::StyleCoded.to_string(), "style_coded");
    }
}
