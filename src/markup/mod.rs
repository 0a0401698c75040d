//! Markup module: block boundary detection and provisional previews.
//!
//! This module contains:
//! - [`BlockKind`] / [`BlockKinds`]: the fixed block vocabulary
//! - [`scan`]: splits an accumulated buffer into complete blocks plus a trailing fragment
//! - [`preview`]: auto-closes a trailing fragment when that is structurally safe
//! - [`renderable_text`]: the two combined, i.e. what a render tick writes

mod block;
mod preview;
mod scanner;

pub use block::{BlockKind, BlockKinds};
pub use preview::{preview, strip_dangling_tag};
pub use scanner::{scan, Block, ParseResult};

/// Compute the markup to show for `buffer` during streaming.
///
/// This is every complete block followed, when policy allows, by a
/// synthesized closed form of the trailing fragment.
pub fn renderable_text(buffer: &str, previewable: BlockKinds) -> String {
    let parsed = scan(buffer);
    let mut out = String::with_capacity(buffer.len() + 16);
    out.push_str(parsed.complete);
    if let Some(provisional) = parsed.trailing.and_then(|t| preview(t, previewable)) {
        out.push_str(&provisional);
    }
    out
}
