//! Markup loader: XML credits text to a [`MarkupDocument`].
//!
//! Only `line` elements whose parent is `page` and grandparent is `credits`
//! are kept. For each line the loader records the `fontsize` and `style`
//! attributes plus the full descendant text, and separately any direct
//! `left`/`right` children as column payloads.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use roll_core::{MarkupDocument, MarkupLine, MarkupPayload};
use tracing::debug;

use crate::error::ParserError;

/// An open `line` element.
struct LineCapture {
    /// Depth of the `line` element in the element stack.
    depth: usize,
    payload: MarkupPayload,
    columns: Vec<MarkupPayload>,
    /// Open `left`/`right` child and its depth.
    column: Option<(usize, MarkupPayload)>,
}

impl LineCapture {
    fn push_text(&mut self, text: &str) {
        self.payload.text.push_str(text);
        if let Some((_, column)) = self.column.as_mut() {
            column.text.push_str(text);
        }
    }

    fn finish(self) -> MarkupLine {
        MarkupLine {
            payload: self.payload,
            columns: self.columns,
        }
    }
}

/// Parse XML credits into the line model.
///
/// # Errors
/// Returns [`ParserError::Markup`] for malformed XML (mismatched tags, bad
/// entities) and [`ParserError::Attribute`] for malformed attributes.
pub fn load_markup(xml: &str) -> Result<MarkupDocument, ParserError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();
    let mut lines = Vec::new();
    let mut current: Option<LineCapture> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                open_element(&start, &stack, &mut current, &mut lines, false)?;
                stack.push(element_name(&start));
            }
            Event::Empty(start) => {
                open_element(&start, &stack, &mut current, &mut lines, true)?;
            }
            Event::End(_) => {
                stack.pop();
                close_element(stack.len(), &mut current, &mut lines);
            }
            Event::Text(text) => {
                if let Some(capture) = current.as_mut() {
                    capture.push_text(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(capture) = current.as_mut() {
                    capture.push_text(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    debug!(lines = lines.len(), "loaded markup document");
    Ok(MarkupDocument::new(lines))
}

fn open_element(
    start: &BytesStart<'_>,
    stack: &[String],
    current: &mut Option<LineCapture>,
    lines: &mut Vec<MarkupLine>,
    empty: bool,
) -> Result<(), ParserError> {
    let name = element_name(start);
    let depth = stack.len();

    if current.is_none() {
        if name == "line" && is_page_child(stack) {
            let capture = LineCapture {
                depth,
                payload: payload_from(start)?,
                columns: Vec::new(),
                column: None,
            };
            if empty {
                lines.push(capture.finish());
            } else {
                *current = Some(capture);
            }
        }
        return Ok(());
    }

    let Some(capture) = current.as_mut() else {
        return Ok(());
    };
    if capture.column.is_none()
        && depth == capture.depth + 1
        && (name == "left" || name == "right")
    {
        let column = payload_from(start)?;
        if empty {
            capture.columns.push(column);
        } else {
            capture.column = Some((depth, column));
        }
    }
    Ok(())
}

fn close_element(depth: usize, current: &mut Option<LineCapture>, lines: &mut Vec<MarkupLine>) {
    let Some(capture) = current.as_mut() else {
        return;
    };

    if capture
        .column
        .as_ref()
        .is_some_and(|(column_depth, _)| *column_depth == depth)
        && let Some((_, column)) = capture.column.take()
    {
        capture.columns.push(column);
        return;
    }

    if capture.depth == depth
        && let Some(capture) = current.take()
    {
        lines.push(capture.finish());
    }
}

fn is_page_child(stack: &[String]) -> bool {
    matches!(stack, [.., grandparent, parent] if grandparent == "credits" && parent == "page")
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn payload_from(start: &BytesStart<'_>) -> Result<MarkupPayload, ParserError> {
    Ok(MarkupPayload {
        font_size: attribute(start, "fontsize")?,
        style: attribute(start, "style")?,
        text: String::new(),
    })
}

fn attribute(start: &BytesStart<'_>, name: &str) -> Result<Option<String>, ParserError> {
    match start.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value().map(Cow::into_owned)?)),
        None => Ok(None),
    }
}
