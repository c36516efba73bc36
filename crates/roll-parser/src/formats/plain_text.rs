//! Line-prefix credits dialect.
//!
//! Lines starting with `_` carry a section or role label. Every other line
//! lists contributors for the active role, several per line separated by `|`.

use roll_core::{CreditsBuilder, CreditsDocument};
use tracing::{debug, info};

use crate::filter::InclusionFilter;

/// Prefix marking a section or role label.
pub const LABEL_MARKER: char = '_';

/// Separator between contributors sharing a line.
pub const NAME_SEPARATOR: char = '|';

#[derive(Debug, Default)]
struct PlainTextState {
    section_enabled: bool,
    current_role: Option<String>,
}

impl PlainTextState {
    fn label(&mut self, label: &str, filter: &InclusionFilter<'_>) {
        if filter.is_included_section(label) {
            debug!(section = label, "section enabled");
            self.section_enabled = true;
            self.current_role = None;
        } else if filter.is_excluded_section(label) {
            debug!(section = label, "section disabled");
            self.section_enabled = false;
            self.current_role = None;
        } else if filter.is_excluded_role(label) {
            self.current_role = None;
        } else if self.section_enabled {
            self.current_role = filter.role(label);
        }
    }
}

/// Parse plain-text credits for `release`.
///
/// Sections start disabled: nothing is collected before the first included
/// section label.
#[must_use]
pub fn parse_plain_text(
    release: &str,
    content: &str,
    filter: &InclusionFilter<'_>,
) -> CreditsDocument {
    let mut state = PlainTextState::default();
    let mut builder = CreditsBuilder::new(release);

    for line in content.lines() {
        if let Some(label) = line.strip_prefix(LABEL_MARKER) {
            state.label(label.trim(), filter);
            continue;
        }

        let Some(role) = state.current_role.as_deref() else {
            continue;
        };
        if !state.section_enabled {
            continue;
        }
        for raw in line.trim().split(NAME_SEPARATOR) {
            if let Some(name) = filter.contributor(raw) {
                builder.add(role, name);
            }
        }
    }

    let document = builder.finish();
    info!(
        release,
        roles = document.role_count(),
        contributors = document.contributor_count(),
        "parsed plain-text credits"
    );
    document
}
