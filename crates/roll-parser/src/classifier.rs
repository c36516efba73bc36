//! Markup dialect classification.
//!
//! Every style-coded document in the corpus carries a `style` attribute on
//! its first line and no size-coded document does. That observation is the
//! whole heuristic, so a per-release override in [`DialectProfiles`] wins
//! over it.

use roll_core::{DialectProfiles, MarkupDialect, MarkupDocument};
use tracing::debug;

/// Dialect for `release`, honouring configured overrides.
#[must_use]
pub fn classify(
    release: &str,
    document: &MarkupDocument,
    profiles: &DialectProfiles,
) -> MarkupDialect {
    if let Some(dialect) = profiles.override_for(release) {
        debug!(release, %dialect, "dialect fixed by override");
        return dialect;
    }
    let dialect = detect_dialect(document);
    debug!(release, %dialect, "dialect detected from first line");
    dialect
}

/// Dialect implied by the first line alone. Documents without lines default
/// to the style-coded dialect.
#[must_use]
pub fn detect_dialect(document: &MarkupDocument) -> MarkupDialect {
    match document.first_line() {
        Some(line) if line.payload.style().is_empty() => MarkupDialect::SizeCoded,
        _ => MarkupDialect::StyleCoded,
    }
}
