//! Safe-Preview Synthesizer: provisional closed forms of a trailing fragment.
//!
//! Policy, by the first element opened in the fragment:
//! - simple kind: strip a dangling half-typed tag and append the closing tag
//! - complex kind: withheld until it completes
//! - no recognized tag: loose text is wrapped in a paragraph so a structured
//!   document never receives bare text nodes

use super::block::{BlockKind, BlockKinds};
use super::scanner::{match_open_tag, opening_tag_at};

/// Build a provisional, well-formed form of `fragment`.
///
/// Returns `None` when nothing in the fragment may be shown yet. `previewable`
/// selects the kinds allowed to be auto-closed; complex kinds are never
/// previewed regardless.
pub fn preview(fragment: &str, previewable: BlockKinds) -> Option<String> {
    let body = fragment.trim_start();

    if let Some(name) = leading_tag_name(body) {
        if let Some(kind) = BlockKind::from_tag(name) {
            return preview_block(fragment, body, kind, previewable);
        }
    }

    wrap_loose_text(fragment, previewable)
}

fn preview_block(
    fragment: &str,
    body: &str,
    kind: BlockKind,
    previewable: BlockKinds,
) -> Option<String> {
    if !kind.is_simple() || !previewable.contains(kind.flag()) {
        return None;
    }
    // `<p` or `<h2 class="x` is not an element yet.
    match_open_tag(body.as_bytes(), 0, kind.tag())?;

    let cleaned = strip_dangling_tag(fragment);
    Some(format!("{cleaned}</{}>", kind.tag()))
}

fn wrap_loose_text(fragment: &str, previewable: BlockKinds) -> Option<String> {
    if !previewable.contains(BlockKinds::PARAGRAPH) {
        return None;
    }
    let text = &fragment[..first_block_opening(fragment).unwrap_or(fragment.len())];
    let text = strip_dangling_tag(text);
    if text.trim().is_empty() {
        return None;
    }
    Some(format!("<p>{text}</p>"))
}

/// The tag name at the start of `s`, e.g. `h2` for `<h2 class="x">`.
fn leading_tag_name(s: &str) -> Option<&str> {
    let rest = s.strip_prefix('<')?;
    if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Remove half-typed tags at the very end of `s`.
///
/// Strips an opening tag missing its `>` (`<stro`), a closing tag missing its
/// name or `>` (`</`, `</p`), and a lone `<`.
pub fn strip_dangling_tag(s: &str) -> &str {
    let mut out = s;
    while let Some(lt) = out.rfind('<') {
        let tail = &out[lt + 1..];
        let dangling = !tail.contains('>')
            && (tail.is_empty() || tail.starts_with('/') || tail.starts_with(|c: char| c.is_ascii_alphabetic()));
        if !dangling {
            break;
        }
        out = &out[..lt];
    }
    out
}

fn first_block_opening(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    s.match_indices('<')
        .map(|(i, _)| i)
        .find(|&i| opening_tag_at(bytes, i).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: BlockKinds = BlockKinds::SIMPLE;

    #[test]
    fn test_preview_simple_block() {
        assert_eq!(preview("<p>Hel", SIMPLE).as_deref(), Some("<p>Hel</p>"));
        assert_eq!(preview("<h3>Ti", SIMPLE).as_deref(), Some("<h3>Ti</h3>"));
    }

    #[test]
    fn test_preview_strips_dangling_open_tag() {
        assert_eq!(
            preview("<p>Hello <stro", SIMPLE).as_deref(),
            Some("<p>Hello </p>")
        );
        assert_eq!(
            preview("<p>a <a href=\"http://x", SIMPLE).as_deref(),
            Some("<p>a </p>")
        );
    }

    #[test]
    fn test_preview_strips_dangling_close_tag() {
        assert_eq!(
            preview("<p><strong>b</strong></p", SIMPLE).as_deref(),
            Some("<p><strong>b</strong></p>")
        );
        assert_eq!(preview("<p>x</", SIMPLE).as_deref(), Some("<p>x</p>"));
        assert_eq!(preview("<p>x<", SIMPLE).as_deref(), Some("<p>x</p>"));
    }

    #[test]
    fn test_preview_incomplete_opening_tag() {
        assert_eq!(preview("<p", SIMPLE), None);
        assert_eq!(preview("<h1 class=\"big", SIMPLE), None);
        assert_eq!(preview("<", SIMPLE), None);
        assert_eq!(preview("<u", SIMPLE), None);
    }

    #[test]
    fn test_preview_complex_withheld() {
        assert_eq!(preview("<ul><li>A</li>", SIMPLE), None);
        assert_eq!(preview("<table><tr><td>1", SIMPLE), None);
        assert_eq!(preview("\n<blockquote>quote", SIMPLE), None);
        assert_eq!(preview("<pre>code", BlockKinds::all()), None);
    }

    #[test]
    fn test_preview_loose_text_wrapped() {
        assert_eq!(preview("just text", SIMPLE).as_deref(), Some("<p>just text</p>"));
        assert_eq!(preview("   \n ", SIMPLE), None);
    }

    #[test]
    fn test_preview_loose_text_stops_at_block() {
        assert_eq!(
            preview("lead <ul><li>A", SIMPLE).as_deref(),
            Some("<p>lead </p>")
        );
    }

    #[test]
    fn test_preview_loose_text_cut_leaves_no_dangling_tag() {
        assert_eq!(
            preview("a <x<p>b", SIMPLE).as_deref(),
            Some("<p>a </p>")
        );
    }

    #[test]
    fn test_preview_unknown_tag_wrapped() {
        assert_eq!(
            preview("<div>x", SIMPLE).as_deref(),
            Some("<p><div>x</p>")
        );
    }

    #[test]
    fn test_preview_respects_config() {
        assert_eq!(preview("<p>x", BlockKinds::HEADINGS), None);
        assert_eq!(preview("loose", BlockKinds::HEADINGS), None);
        assert_eq!(
            preview("<h1>x", BlockKinds::HEADINGS).as_deref(),
            Some("<h1>x</h1>")
        );
    }

    #[test]
    fn test_strip_dangling_tag() {
        assert_eq!(strip_dangling_tag("<p>a<b<i"), "<p>a");
        assert_eq!(strip_dangling_tag("<p>a < b"), "<p>a < b");
        assert_eq!(strip_dangling_tag("<p>1 <3"), "<p>1 <3");
        assert_eq!(strip_dangling_tag("<p>done</p>"), "<p>done</p>");
    }
}
