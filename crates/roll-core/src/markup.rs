//! In-memory model of a hierarchical-markup credits document.
//!
//! Only the `credits > page > line` structure matters to the parsers. A line
//! either carries its own payload or is split into `left`/`right` column
//! payloads, each with its own attributes.

use serde::{Deserialize, Serialize};

/// Attributes and text of one structural element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupPayload {
    /// `fontsize` attribute (size-coded dialect).
    pub font_size: Option<String>,
    /// `style` attribute (style-coded dialect).
    pub style: Option<String>,
    /// Concatenated descendant text, unnormalized.
    pub text: String,
}

impl MarkupPayload {
    /// Payload carrying a font size.
    #[must_use]
    pub fn sized(font_size: &str, text: &str) -> Self {
        Self {
            font_size: Some(font_size.to_string()),
            style: None,
            text: text.to_string(),
        }
    }

    /// Payload carrying a style tag.
    #[must_use]
    pub fn styled(style: &str, text: &str) -> Self {
        Self {
            font_size: None,
            style: Some(style.to_string()),
            text: text.to_string(),
        }
    }

    /// Font size, or `""` when absent.
    #[must_use]
    pub fn font_size(&self) -> &str {
        self.font_size.as_deref().unwrap_or_default()
    }

    /// Style tag, or `""` when absent.
    #[must_use]
    pub fn style(&self) -> &str {
        self.style.as_deref().unwrap_or_default()
    }

    /// Text trimmed with internal whitespace runs collapsed to one space.
    #[must_use]
    pub fn normalized_text(&self) -> String {
        collapse_whitespace(&self.text)
    }
}

/// One `line` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupLine {
    /// The line's own attributes and full text.
    pub payload: MarkupPayload,
    /// `left`/`right` column payloads in document order. Empty for unsplit lines.
    #[serde(default)]
    pub columns: Vec<MarkupPayload>,
}

impl MarkupLine {
    /// An unsplit line.
    #[must_use]
    pub fn single(payload: MarkupPayload) -> Self {
        Self {
            payload,
            columns: Vec::new(),
        }
    }

    /// A line split into columns. The line's own payload concatenates the
    /// column text the way a markup reader would.
    #[must_use]
    pub fn split(columns: Vec<MarkupPayload>) -> Self {
        let text = columns
            .iter()
            .map(|column| column.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            payload: MarkupPayload {
                font_size: None,
                style: None,
                text,
            },
            columns,
        }
    }

    /// Payloads to classify: the columns when present, otherwise the line.
    #[must_use]
    pub fn payloads(&self) -> &[MarkupPayload] {
        if self.columns.is_empty() {
            std::slice::from_ref(&self.payload)
        } else {
            &self.columns
        }
    }
}

/// A decoded markup credits document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupDocument {
    pub lines: Vec<MarkupLine>,
}

impl MarkupDocument {
    #[must_use]
    pub const fn new(lines: Vec<MarkupLine>) -> Self {
        Self { lines }
    }

    /// First structural line, used for dialect classification.
    #[must_use]
    pub fn first_line(&self) -> Option<&MarkupLine> {
        self.lines.first()
    }
}

/// Trim and collapse every whitespace run to a single space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
