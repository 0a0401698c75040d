//! Patch Applier: reconcile the session-owned range with new renderable text.
//!
//! The session owns the span `[anchor, anchor + extent)` of the document.
//! Each apply either leaves it alone (text unchanged), inserts at the anchor
//! (nothing written yet), or replaces the whole span in one operation. The
//! granularity is the full session range; there is no finer diff.

use super::traits::Document;
use crate::error::DocumentError;
use std::ops::Range;

/// What a patch did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Text matched the last write; the document was not touched.
    Unchanged,
    /// First write of the session.
    Inserted {
        /// Extent now occupied by the session's content.
        extent: usize,
    },
    /// The session range was replaced.
    Replaced {
        /// Extent now occupied by the session's content.
        extent: usize,
    },
}

/// Tracks what has been written at a fixed anchor.
#[derive(Debug, Clone)]
pub struct Patcher {
    /// Start of the session-owned range. Never changes.
    anchor: usize,
    /// Text of the last successful write.
    last_rendered: String,
    /// Extent occupied by `last_rendered` in the document.
    extent: usize,
    /// Whether anything has been written yet.
    written: bool,
}

impl Patcher {
    /// Create a patcher owning content starting at `anchor`.
    pub const fn new(anchor: usize) -> Self {
        Self {
            anchor,
            last_rendered: String::new(),
            extent: 0,
            written: false,
        }
    }

    /// The anchor position.
    pub const fn anchor(&self) -> usize {
        self.anchor
    }

    /// Text of the last successful write.
    pub fn last_rendered(&self) -> &str {
        &self.last_rendered
    }

    /// Extent of the last successful write.
    pub const fn extent(&self) -> usize {
        self.extent
    }

    /// The document range currently owned.
    pub const fn range(&self) -> Range<usize> {
        self.anchor..self.anchor + self.extent
    }

    /// Make the owned range show `text`.
    ///
    /// On error the recorded state is unchanged, so the same call can simply
    /// be retried later.
    pub fn apply<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        text: &str,
    ) -> Result<PatchOutcome, DocumentError> {
        // Before the first write `last_rendered` is empty, so empty text is a no-op too.
        if text == self.last_rendered {
            return Ok(PatchOutcome::Unchanged);
        }

        let outcome = if self.written {
            let range = self.range();
            let len = document.len();
            if range.end > len {
                return Err(DocumentError::RangeOutOfBounds {
                    start: range.start,
                    end: range.end,
                    len,
                });
            }
            let extent = document.replace_range(range, text)?;
            self.extent = extent;
            PatchOutcome::Replaced { extent }
        } else {
            let extent = document.insert_markup(self.anchor, text)?;
            self.extent = extent;
            PatchOutcome::Inserted { extent }
        };

        self.last_rendered.clear();
        self.last_rendered.push_str(text);
        self.written = true;
        Ok(outcome)
    }
}
