//! Size-coded markup dialect.
//!
//! Sections, roles, and contributor names are all `line` elements told apart
//! only by `fontsize`. Section and role lines may share a size, in which case
//! a label is a section only when the policy names it as one.
//!
//! A release may embed a second release's credits. Lines at the profile's
//! marker size switch between the two, and the stop label inside the embedded
//! release suppresses output until the next marker instead of ending the
//! document.

use roll_core::{
    CreditsBuilder, CreditsDocument, MarkupDocument, MarkupPayload, SizeCodedProfile,
};
use tracing::{debug, info};

use crate::filter::InclusionFilter;

/// Separator between contributors sharing a line.
pub const NAME_SEPARATOR: &str = " - ";

/// Which release names are currently credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveRelease {
    Primary,
    Embedded,
}

/// What the caller should do after one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    SkipLine,
    Stop,
}

struct SizeCodedState<'a> {
    profile: &'a SizeCodedProfile,
    filter: &'a InclusionFilter<'a>,
    section_enabled: bool,
    current_role: Option<String>,
    active: ActiveRelease,
    deferred: bool,
    primary: CreditsBuilder,
    embedded: Option<CreditsBuilder>,
}

impl<'a> SizeCodedState<'a> {
    fn new(release: &str, profile: &'a SizeCodedProfile, filter: &'a InclusionFilter<'a>) -> Self {
        Self {
            profile,
            filter,
            section_enabled: true,
            current_role: None,
            active: ActiveRelease::Primary,
            deferred: false,
            primary: CreditsBuilder::new(release),
            embedded: profile
                .sub_release
                .as_ref()
                .map(|sub| CreditsBuilder::new(sub.release.as_str())),
        }
    }

    fn payload(&mut self, payload: &MarkupPayload) -> Step {
        let size = payload.font_size();
        let text = payload.normalized_text();

        if let Some(sub) = &self.profile.sub_release
            && size == sub.marker_size
        {
            self.active = if text == sub.marker_text {
                ActiveRelease::Embedded
            } else {
                ActiveRelease::Primary
            };
            self.deferred = false;
            debug!(active = ?self.active, marker = %text, "switched release");
            return Step::SkipLine;
        }

        if self.deferred {
            return Step::Continue;
        }

        if size == self.profile.section_size() {
            if text == self.profile.stop_at {
                if self.active == ActiveRelease::Embedded {
                    debug!(section = %text, "embedded release reached stop label");
                    self.deferred = true;
                    return Step::Continue;
                }
                return Step::Stop;
            }
            if self.filter.is_included_section(&text) {
                debug!(section = %text, "section enabled");
                self.section_enabled = true;
                self.current_role = None;
                return Step::Continue;
            }
            if self.filter.is_excluded_section(&text) {
                debug!(section = %text, "section disabled");
                self.section_enabled = false;
                self.current_role = None;
                return Step::Continue;
            }
        }

        if !self.section_enabled {
            return Step::Continue;
        }

        if size == self.profile.role_size {
            self.current_role = self.filter.role(&text);
        } else if size == self.profile.contributor_size
            && let Some(role) = self.current_role.as_deref()
        {
            let builder = match (self.active, self.embedded.as_mut()) {
                (ActiveRelease::Embedded, Some(embedded)) => embedded,
                _ => &mut self.primary,
            };
            for raw in text.split(NAME_SEPARATOR) {
                if let Some(name) = self.filter.contributor(raw) {
                    builder.add(role, name);
                }
            }
        }
        Step::Continue
    }

    fn finish(self) -> Vec<CreditsDocument> {
        std::iter::once(self.primary)
            .chain(self.embedded)
            .map(CreditsBuilder::finish)
            .collect()
    }
}

/// Parse a size-coded document for `release`.
///
/// Returns the primary release's document first, followed by the embedded
/// release's document when the profile declares one.
#[must_use]
pub fn parse_size_coded(
    release: &str,
    document: &MarkupDocument,
    profile: &SizeCodedProfile,
    filter: &InclusionFilter<'_>,
) -> Vec<CreditsDocument> {
    let mut state = SizeCodedState::new(release, profile, filter);

    'lines: for (index, line) in document.lines.iter().enumerate() {
        for payload in line.payloads() {
            match state.payload(payload) {
                Step::Continue => {}
                Step::SkipLine => continue 'lines,
                Step::Stop => {
                    debug!(release, line = index + 1, "reached stop label");
                    break 'lines;
                }
            }
        }
    }

    let documents = state.finish();
    for doc in &documents {
        info!(
            release = %doc.release,
            roles = doc.role_count(),
            contributors = doc.contributor_count(),
            "parsed size-coded credits"
        );
    }
    documents
}
