//! The document collaborator that streamed markup is written into.

use crate::error::DocumentError;
use std::ops::Range;

/// A mutable rich-text document that accepts markup.
///
/// Positions are opaque document units; the only requirement is that
/// `insert_markup` and `replace_range` report how many units the written
/// markup now occupies, so a later replace can cover exactly that span.
pub trait Document {
    /// The current cursor (selection start) position.
    fn cursor_position(&self) -> usize;

    /// Total length of the document in position units.
    fn len(&self) -> usize;

    /// Whether the document is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Toggle whether the user may edit the document.
    ///
    /// Programmatic mutations through this trait stay allowed either way.
    fn set_editable(&mut self, editable: bool);

    /// Insert `markup` at `at`, returning the extent it now occupies.
    fn insert_markup(&mut self, at: usize, markup: &str) -> Result<usize, DocumentError>;

    /// Replace `range` with `markup` atomically, returning the new extent.
    fn replace_range(&mut self, range: Range<usize>, markup: &str) -> Result<usize, DocumentError>;

    /// Delete the current selection, if any.
    fn delete_selection(&mut self) -> Result<(), DocumentError>;

    /// Give the document input focus.
    fn focus(&mut self) {}

    /// Bring `position` into view.
    fn scroll_into_view(&mut self, _position: usize) {}
}

impl<D: Document + ?Sized> Document for &mut D {
    fn cursor_position(&self) -> usize {
        (**self).cursor_position()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn set_editable(&mut self, editable: bool) {
        (**self).set_editable(editable);
    }

    fn insert_markup(&mut self, at: usize, markup: &str) -> Result<usize, DocumentError> {
        (**self).insert_markup(at, markup)
    }

    fn replace_range(&mut self, range: Range<usize>, markup: &str) -> Result<usize, DocumentError> {
        (**self).replace_range(range, markup)
    }

    fn delete_selection(&mut self) -> Result<(), DocumentError> {
        (**self).delete_selection()
    }

    fn focus(&mut self) {
        (**self).focus();
    }

    fn scroll_into_view(&mut self, position: usize) {
        (**self).scroll_into_view(position);
    }
}
