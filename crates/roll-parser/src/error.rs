//! Parser error types for roll-parser.

use std::path::PathBuf;

use roll_core::MarkupDialect;

/// Errors that can occur while reading or parsing a credits document.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Unknown style '{style}' in {release} credits at line {line}")]
    UnknownStyle {
        release: String,
        style: String,
        line: usize,
    },

    #[error("No {dialect} profile configured for release '{release}'")]
    MissingProfile {
        release: String,
        dialect: MarkupDialect,
    },

    #[error("Malformed markup: {0}")]
    Markup(#[from] quick_xml::Error),

    #[error("Malformed markup attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Unsupported credits source: {}", .0.display())]
    UnsupportedSource(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
