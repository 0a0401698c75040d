//! Block Boundary Scanner: split an accumulated buffer into complete blocks.
//!
//! The scanner is a pure function over the buffer. It never copies: every
//! [`Block`] and the trailing fragment borrow from the input, and together
//! they partition it exactly:
//!
//! ```text
//! concat(blocks) + trailing == buffer
//! ```
//!
//! Matching is anchored. At each scan offset a known opening tag is tried in
//! place; the element's extent is found by counting nesting depth of that same
//! tag name, so a `<blockquote>` containing a `<blockquote>` ends at the outer
//! close. Loose text at the scan offset is carried into the next block that
//! completes, or into the trailing fragment when none does.

use super::block::BlockKind;

/// A complete top-level block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// The element kind.
    pub kind: BlockKind,
    /// The block's raw markup, including any loose text carried before it.
    pub markup: &'a str,
    /// Byte offset within `markup` where the element's opening tag starts.
    pub lead: usize,
}

impl<'a> Block<'a> {
    /// The element itself, without carried loose text.
    pub fn element(&self) -> &'a str {
        &self.markup[self.lead..]
    }
}

/// Result of scanning a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<'a> {
    /// Complete blocks in buffer order.
    pub blocks: Vec<Block<'a>>,
    /// The concatenation of `blocks` (a prefix of the buffer).
    pub complete: &'a str,
    /// The unparsed suffix, `None` when the buffer ends on a block boundary.
    pub trailing: Option<&'a str>,
}

/// Scan `buffer` into complete blocks and an optional trailing fragment.
pub fn scan(buffer: &str) -> ParseResult<'_> {
    let bytes = buffer.as_bytes();
    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let Some(start) = next_opening(bytes, pos) else {
            break;
        };
        let Some((kind, end)) = complete_block_at(bytes, start) else {
            // The first opening tag never closes; everything after it is nested.
            break;
        };
        blocks.push(Block {
            kind,
            markup: &buffer[pos..end],
            lead: start - pos,
        });
        pos = end;
    }

    ParseResult {
        blocks,
        complete: &buffer[..pos],
        trailing: (pos < buffer.len()).then(|| &buffer[pos..]),
    }
}

/// Find the first offset at or after `from` where a known opening tag starts.
fn next_opening(bytes: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(offset) = find_byte(bytes, pos, b'<') {
        if opening_tag_at(bytes, offset).is_some() {
            return Some(offset);
        }
        pos = offset + 1;
    }
    None
}

/// Match a complete block starting at `start`, returning its kind and end.
fn complete_block_at(bytes: &[u8], start: usize) -> Option<(BlockKind, usize)> {
    let (kind, _) = opening_tag_at(bytes, start)?;
    find_block_end(bytes, start, kind.tag()).map(|end| (kind, end))
}

/// Match any known opening tag at `pos`.
pub(crate) fn opening_tag_at(bytes: &[u8], pos: usize) -> Option<(BlockKind, usize)> {
    BlockKind::ALL
        .into_iter()
        .find_map(|kind| match_open_tag(bytes, pos, kind.tag()).map(|end| (kind, end)))
}

/// Depth-counted search for the close of the element opened at `start`.
///
/// Only tags with the same name move the depth counter.
fn find_block_end(bytes: &[u8], start: usize, name: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = start;

    while let Some(offset) = find_byte(bytes, pos, b'<') {
        if let Some(end) = match_open_tag(bytes, offset, name) {
            depth += 1;
            pos = end;
        } else if let Some(end) = match_close_tag(bytes, offset, name) {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(end);
            }
            pos = end;
        } else {
            pos = offset + 1;
        }
    }

    None
}

/// Match `<name>` or `<name attrs...>` at `pos`, returning the offset past `>`.
///
/// A tag still missing its `>` does not match.
pub(crate) fn match_open_tag(bytes: &[u8], pos: usize, name: &str) -> Option<usize> {
    if bytes.get(pos) != Some(&b'<') {
        return None;
    }
    let after = match_name(bytes, pos + 1, name)?;
    match bytes.get(after)? {
        b'>' => Some(after + 1),
        b if b.is_ascii_whitespace() => find_byte(bytes, after, b'>').map(|gt| gt + 1),
        _ => None,
    }
}

/// Match `</name>` at `pos`, returning the offset past `>`.
fn match_close_tag(bytes: &[u8], pos: usize, name: &str) -> Option<usize> {
    if bytes.get(pos..pos + 2)? != b"</" {
        return None;
    }
    let after = match_name(bytes, pos + 2, name)?;
    (bytes.get(after) == Some(&b'>')).then_some(after + 1)
}

fn match_name(bytes: &[u8], pos: usize, name: &str) -> Option<usize> {
    let end = pos + name.len();
    let candidate = bytes.get(pos..end)?;
    candidate.eq_ignore_ascii_case(name.as_bytes()).then_some(end)
}

#[inline]
fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|i| from + i)
}
