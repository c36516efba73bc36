//! Format dispatch: one entry point over every credits family.

use std::fmt;

use roll_core::{CreditsDocument, DialectProfiles, InclusionPolicy, MarkupDialect};
use tracing::debug;

use crate::classifier::classify;
use crate::error::ParserError;
use crate::filter::InclusionFilter;
use crate::formats::{parse_plain_text, parse_size_coded, parse_style_coded};
use crate::source::CreditsSource;

/// The concrete parser a source is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditsFormat {
    PlainText,
    Markup(MarkupDialect),
}

impl fmt::Display for CreditsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlainText => f.write_str("plain_text"),
            Self::Markup(dialect) => write!(f, "{dialect}"),
        }
    }
}

/// Parses credits sources against one policy and set of dialect profiles.
///
/// The engine only borrows configuration, so a single instance can be shared
/// across threads parsing independent documents.
#[derive(Debug, Clone, Copy)]
pub struct CreditsEngine<'c> {
    filter: InclusionFilter<'c>,
    profiles: &'c DialectProfiles,
}

impl<'c> CreditsEngine<'c> {
    #[must_use]
    pub const fn new(policy: &'c InclusionPolicy, profiles: &'c DialectProfiles) -> Self {
        Self {
            filter: InclusionFilter::new(policy),
            profiles,
        }
    }

    /// Parser `source` would be routed to.
    #[must_use]
    pub fn format_of(&self, release: &str, source: &CreditsSource) -> CreditsFormat {
        match source {
            CreditsSource::PlainText(_) => CreditsFormat::PlainText,
            CreditsSource::Markup(document) => {
                CreditsFormat::Markup(classify(release, document, self.profiles))
            }
        }
    }

    /// Parse one source into one document per release it holds.
    ///
    /// Plain-text and style-coded sources always yield exactly one document.
    /// Size-coded sources yield a second document when the release embeds
    /// another release's credits.
    ///
    /// # Errors
    /// Returns [`ParserError::MissingProfile`] when a markup release has no
    /// profile for its dialect, and [`ParserError::UnknownStyle`] from the
    /// style-coded parser.
    pub fn parse(
        &self,
        release: &str,
        source: &CreditsSource,
    ) -> Result<Vec<CreditsDocument>, ParserError> {
        let format = self.format_of(release, source);
        debug!(release, %format, "parsing credits");

        match (format, source) {
            (_, CreditsSource::PlainText(content)) => {
                Ok(vec![parse_plain_text(release, content, &self.filter)])
            }
            (CreditsFormat::Markup(MarkupDialect::SizeCoded), CreditsSource::Markup(document)) => {
                let profile = self.profiles.size_coded(release).ok_or_else(|| {
                    ParserError::MissingProfile {
                        release: release.to_string(),
                        dialect: MarkupDialect::SizeCoded,
                    }
                })?;
                Ok(parse_size_coded(release, document, profile, &self.filter))
            }
            (_, CreditsSource::Markup(document)) => {
                let profile = self.profiles.style_coded(release).ok_or_else(|| {
                    ParserError::MissingProfile {
                        release: release.to_string(),
                        dialect: MarkupDialect::StyleCoded,
                    }
                })?;
                Ok(vec![parse_style_coded(
                    release,
                    document,
                    profile,
                    &self.filter,
                )?])
            }
        }
    }
}
