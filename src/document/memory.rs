//! `MemoryDocument`: a plain-string document for demos, tests and benches.
//!
//! Markup is stored verbatim and positions are byte offsets, so the extent
//! of any written markup is its byte length.

use super::traits::Document;
use crate::error::DocumentError;
use std::ops::Range;

/// An in-memory markup document with a cursor and optional selection.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    /// Document contents.
    text: String,
    /// Cursor byte offset.
    cursor: usize,
    /// Selected byte range, if any.
    selection: Option<Range<usize>>,
    /// Whether user edits are accepted.
    read_only: bool,
    /// Incremented on every successful mutation.
    revision: u64,
    /// Last position passed to `scroll_into_view`.
    scrolled_to: Option<usize>,
    /// Whether `focus` has been called.
    focused: bool,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document holding `markup` with the cursor at the end.
    pub fn from_markup(markup: impl Into<String>) -> Self {
        let text = markup.into();
        Self {
            cursor: text.len(),
            text,
            ..Self::default()
        }
    }

    /// The document contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of successful mutations so far.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the user may currently edit.
    pub const fn is_editable(&self) -> bool {
        !self.read_only
    }

    /// Last scroll target, if any.
    pub const fn scrolled_to(&self) -> Option<usize> {
        self.scrolled_to
    }

    /// Whether the document has been focused.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Move the cursor, clearing any selection.
    pub fn set_cursor(&mut self, position: usize) -> Result<(), DocumentError> {
        self.check_position(position)?;
        self.cursor = position;
        self.selection = None;
        Ok(())
    }

    /// Select `range`; the cursor moves to its start.
    pub fn select(&mut self, range: Range<usize>) -> Result<(), DocumentError> {
        self.check_range(&range)?;
        self.cursor = range.start;
        self.selection = Some(range);
        Ok(())
    }

    /// The current selection.
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// A user keystroke: insert `text` at the cursor.
    ///
    /// Fails with [`DocumentError::ReadOnly`] while editing is disabled.
    pub fn type_text(&mut self, text: &str) -> Result<(), DocumentError> {
        if self.read_only {
            return Err(DocumentError::ReadOnly);
        }
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
        self.revision += 1;
        Ok(())
    }

    /// Truncate the document, simulating an external edit.
    pub fn truncate(&mut self, len: usize) -> Result<(), DocumentError> {
        self.check_position(len)?;
        self.text.truncate(len);
        self.cursor = self.cursor.min(len);
        self.selection = None;
        self.revision += 1;
        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<(), DocumentError> {
        if self.text.is_char_boundary(position) {
            Ok(())
        } else {
            Err(DocumentError::InvalidPosition {
                position,
                len: self.text.len(),
            })
        }
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), DocumentError> {
        let valid = range.start <= range.end
            && self.text.is_char_boundary(range.start)
            && self.text.is_char_boundary(range.end);
        if valid {
            Ok(())
        } else {
            Err(DocumentError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.text.len(),
            })
        }
    }
}

impl Document for MemoryDocument {
    fn cursor_position(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.text.len()
    }

    fn set_editable(&mut self, editable: bool) {
        self.read_only = !editable;
    }

    fn insert_markup(&mut self, at: usize, markup: &str) -> Result<usize, DocumentError> {
        self.check_position(at)?;
        self.text.insert_str(at, markup);
        self.cursor = at + markup.len();
        self.selection = None;
        self.revision += 1;
        Ok(markup.len())
    }

    fn replace_range(&mut self, range: Range<usize>, markup: &str) -> Result<usize, DocumentError> {
        self.check_range(&range)?;
        let start = range.start;
        self.text.replace_range(range, markup);
        self.cursor = start + markup.len();
        self.selection = None;
        self.revision += 1;
        Ok(markup.len())
    }

    fn delete_selection(&mut self) -> Result<(), DocumentError> {
        if let Some(range) = self.selection.clone() {
            self.check_range(&range)?;
            self.cursor = range.start;
            self.text.replace_range(range, "");
            self.selection = None;
            self.revision += 1;
        }
        Ok(())
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn scroll_into_view(&mut self, position: usize) {
        self.scrolled_to = Some(position);
    }
}
