//! Credits sources: decoded file contents tagged by family.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8, UTF_16LE};
use roll_core::MarkupDocument;
use tracing::warn;

use crate::error::ParserError;
use crate::markup::load_markup;

/// A credits document ready for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditsSource {
    /// Line-prefix text (`credits.txt`).
    PlainText(String),
    /// Hierarchical markup (`credits.xml`), already loaded.
    Markup(MarkupDocument),
}

impl CreditsSource {
    /// Build a source from decoded text, choosing the family by extension.
    ///
    /// # Errors
    /// Returns [`ParserError::UnsupportedSource`] for extensions other than
    /// `.txt` and `.xml`, or a markup error if the XML is malformed.
    pub fn from_text(path: &Path, text: &str) -> Result<Self, ParserError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        if extension.eq_ignore_ascii_case("txt") {
            Ok(Self::PlainText(text.to_string()))
        } else if extension.eq_ignore_ascii_case("xml") {
            Ok(Self::Markup(load_markup(text)?))
        } else {
            Err(ParserError::UnsupportedSource(path.to_path_buf()))
        }
    }

    /// Read, decode, and load a credits file.
    ///
    /// # Errors
    /// Returns [`ParserError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_text`].
    pub fn read(path: &Path) -> Result<Self, ParserError> {
        let bytes = std::fs::read(path)?;
        let text = decode_source(&bytes);
        Self::from_text(path, &text)
    }
}

/// Decode credits bytes to text.
///
/// A byte-order mark selects UTF-8 or UTF-16. Without one, text whose second
/// byte is NUL is taken as UTF-16LE (the older plain-text credits) and
/// anything else as UTF-8. Invalid sequences become U+FFFD.
#[must_use]
pub fn decode_source(bytes: &[u8]) -> Cow<'_, str> {
    let encoding = Encoding::for_bom(bytes).map_or_else(
        || {
            if looks_like_utf16le(bytes) {
                UTF_16LE
            } else {
                UTF_8
            }
        },
        |(encoding, _)| encoding,
    );

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = used.name(), "credits source contained invalid sequences");
    }
    text
}

fn looks_like_utf16le(bytes: &[u8]) -> bool {
    matches!(bytes, [first, 0, ..] if *first != 0) && bytes.len() % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn utf16le(text: &str, bom: bool) -> Vec<u8> {
        let mut bytes = if bom { vec![0xFF, 0xFE] } else { Vec::new() };
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn decodes_utf16_with_bom() {
        let bytes = utf16le("_Creative Assembly\n", true);
        assert_eq!(decode_source(&bytes), "_Creative Assembly\n");
    }

    #[test]
    fn decodes_bomless_utf16le() {
        let bytes = utf16le("_Programming\nJosé Núñez\n", false);
        assert_eq!(decode_source(&bytes), "_Programming\nJosé Núñez\n");
    }

    #[test]
    fn decodes_utf8_and_strips_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<credits/>".as_bytes());
        assert_eq!(decode_source(&bytes), "<credits/>");
        assert_eq!(decode_source("Zoë".as_bytes()), "Zoë");
    }

    #[test]
    fn source_family_follows_extension() {
        let text = CreditsSource::from_text(Path::new("games/2004_rome/credits.txt"), "_A\n")
            .expect("txt source");
        assert_eq!(text, CreditsSource::PlainText("_A\n".into()));

        let markup = CreditsSource::from_text(
            Path::new("games/2016_warhammer/CREDITS.XML"),
            r#"<credits><page><line style="header">A</line></page></credits>"#,
        )
        .expect("xml source");
        assert!(matches!(markup, CreditsSource::Markup(doc) if doc.lines.len() == 1));

        assert!(matches!(
            CreditsSource::from_text(Path::new("credits.json"), "{}"),
            Err(ParserError::UnsupportedSource(_))
        ));
    }
}
