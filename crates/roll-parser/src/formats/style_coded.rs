//! Style-coded markup dialect.
//!
//! Every payload carries a `style` tag. `header` and `subheader` are used
//! interchangeably for sections and roles, so a heading is a section only
//! when the policy names it as one.

use roll_core::{
    CreditsBuilder, CreditsDocument, MarkupDocument, MarkupPayload, MarkupStyle,
    StyleCodedProfile,
};
use tracing::{debug, info};

use crate::error::ParserError;
use crate::filter::InclusionFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

struct StyleCodedState<'a> {
    profile: &'a StyleCodedProfile,
    filter: &'a InclusionFilter<'a>,
    section_enabled: bool,
    current_role: Option<String>,
    builder: CreditsBuilder,
}

impl StyleCodedState<'_> {
    fn payload(&mut self, line: usize, payload: &MarkupPayload) -> Result<Step, ParserError> {
        let Some(style) = MarkupStyle::parse(payload.style()) else {
            return Err(ParserError::UnknownStyle {
                release: self.builder.release().to_string(),
                style: payload.style().to_string(),
                line,
            });
        };
        let text = payload.normalized_text();

        if style.is_heading() {
            Ok(self.heading(&text))
        } else {
            if style.is_content() {
                self.content(&text);
            }
            Ok(Step::Continue)
        }
    }

    fn heading(&mut self, text: &str) -> Step {
        if text == self.profile.stop_at {
            return Step::Stop;
        }
        if self.filter.is_included_section(text) {
            debug!(section = %text, "section enabled");
            self.section_enabled = true;
            self.current_role = None;
        } else if self.filter.is_excluded_section(text) {
            debug!(section = %text, "section disabled");
            self.section_enabled = false;
            self.current_role = None;
        } else if self.section_enabled {
            self.current_role = self.filter.role(text);
        } else {
            self.current_role = None;
        }
        Step::Continue
    }

    fn content(&mut self, text: &str) {
        let Some(role) = self.current_role.as_deref() else {
            return;
        };
        if text.is_empty() || self.filter.is_excluded_entity(text) {
            return;
        }
        if let Some(name) = self.filter.contributor(text) {
            self.builder.add(role, name);
        }
    }
}

/// Parse a style-coded document for `release`.
///
/// # Errors
/// Returns [`ParserError::UnknownStyle`] for a payload whose style tag is
/// missing or not one of the known tags. Line numbers are 1-based positions
/// among the document's `line` elements.
pub fn parse_style_coded(
    release: &str,
    document: &MarkupDocument,
    profile: &StyleCodedProfile,
    filter: &InclusionFilter<'_>,
) -> Result<CreditsDocument, ParserError> {
    let mut state = StyleCodedState {
        profile,
        filter,
        section_enabled: true,
        current_role: None,
        builder: CreditsBuilder::new(release),
    };

    'lines: for (index, line) in document.lines.iter().enumerate() {
        for payload in line.payloads() {
            if state.payload(index + 1, payload)? == Step::Stop {
                debug!(release, line = index + 1, "reached stop label");
                break 'lines;
            }
        }
    }

    let document = state.builder.finish();
    info!(
        release,
        roles = document.role_count(),
        contributors = document.contributor_count(),
        "parsed style-coded credits"
    );
    Ok(document)
}
