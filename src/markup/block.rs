//! Block vocabulary: the top-level element kinds the scanner recognizes.
//!
//! Kinds are split into two classes:
//! - **Simple** (`p`, `h1`-`h6`): an incomplete element can be auto-closed
//!   without misrepresenting nested structure.
//! - **Complex** (`ul`, `ol`, `blockquote`, `pre`, `table`): auto-closing
//!   mid-structure would corrupt nested items, so these are only shown once
//!   complete.

use bitflags::bitflags;

/// A recognized top-level block element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `<p>`
    Paragraph,
    /// `<h1>`
    Heading1,
    /// `<h2>`
    Heading2,
    /// `<h3>`
    Heading3,
    /// `<h4>`
    Heading4,
    /// `<h5>`
    Heading5,
    /// `<h6>`
    Heading6,
    /// `<ul>`
    UnorderedList,
    /// `<ol>`
    OrderedList,
    /// `<blockquote>`
    Blockquote,
    /// `<pre>`
    CodeBlock,
    /// `<table>`
    Table,
}

impl BlockKind {
    /// Every kind, simple kinds first.
    pub const ALL: [Self; 12] = [
        Self::Paragraph,
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::Heading4,
        Self::Heading5,
        Self::Heading6,
        Self::UnorderedList,
        Self::OrderedList,
        Self::Blockquote,
        Self::CodeBlock,
        Self::Table,
    ];

    /// The lowercase tag name.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Paragraph => "p",
            Self::Heading1 => "h1",
            Self::Heading2 => "h2",
            Self::Heading3 => "h3",
            Self::Heading4 => "h4",
            Self::Heading5 => "h5",
            Self::Heading6 => "h6",
            Self::UnorderedList => "ul",
            Self::OrderedList => "ol",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "pre",
            Self::Table => "table",
        }
    }

    /// Look up a kind by tag name (ASCII case-insensitive).
    pub fn from_tag(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(name))
    }

    /// Whether an incomplete element of this kind can be safely auto-closed.
    pub const fn is_simple(self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Heading1
                | Self::Heading2
                | Self::Heading3
                | Self::Heading4
                | Self::Heading5
                | Self::Heading6
        )
    }

    /// The single-member set for this kind.
    pub const fn flag(self) -> BlockKinds {
        match self {
            Self::Paragraph => BlockKinds::PARAGRAPH,
            Self::Heading1 => BlockKinds::HEADING1,
            Self::Heading2 => BlockKinds::HEADING2,
            Self::Heading3 => BlockKinds::HEADING3,
            Self::Heading4 => BlockKinds::HEADING4,
            Self::Heading5 => BlockKinds::HEADING5,
            Self::Heading6 => BlockKinds::HEADING6,
            Self::UnorderedList => BlockKinds::UNORDERED_LIST,
            Self::OrderedList => BlockKinds::ORDERED_LIST,
            Self::Blockquote => BlockKinds::BLOCKQUOTE,
            Self::CodeBlock => BlockKinds::CODE_BLOCK,
            Self::Table => BlockKinds::TABLE,
        }
    }
}

bitflags! {
    /// A set of block kinds.
    ///
    /// Used to configure which kinds may be previewed while incomplete.
    ///
    /// # Example
    /// ```
    /// use flywheel_markup::BlockKinds;
    /// let headings_only = BlockKinds::HEADINGS;
    /// assert!(!headings_only.contains(BlockKinds::PARAGRAPH));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BlockKinds: u16 {
        /// `<p>`
        const PARAGRAPH = 1 << 0;
        /// `<h1>`
        const HEADING1 = 1 << 1;
        /// `<h2>`
        const HEADING2 = 1 << 2;
        /// `<h3>`
        const HEADING3 = 1 << 3;
        /// `<h4>`
        const HEADING4 = 1 << 4;
        /// `<h5>`
        const HEADING5 = 1 << 5;
        /// `<h6>`
        const HEADING6 = 1 << 6;
        /// `<ul>`
        const UNORDERED_LIST = 1 << 7;
        /// `<ol>`
        const ORDERED_LIST = 1 << 8;
        /// `<blockquote>`
        const BLOCKQUOTE = 1 << 9;
        /// `<pre>`
        const CODE_BLOCK = 1 << 10;
        /// `<table>`
        const TABLE = 1 << 11;

        /// All heading levels.
        const HEADINGS = Self::HEADING1.bits()
            | Self::HEADING2.bits()
            | Self::HEADING3.bits()
            | Self::HEADING4.bits()
            | Self::HEADING5.bits()
            | Self::HEADING6.bits();
        /// Kinds that are safe to auto-close.
        const SIMPLE = Self::PARAGRAPH.bits() | Self::HEADINGS.bits();
        /// Kinds that must be complete before they are shown.
        const COMPLEX = Self::UNORDERED_LIST.bits()
            | Self::ORDERED_LIST.bits()
            | Self::BLOCKQUOTE.bits()
            | Self::CODE_BLOCK.bits()
            | Self::TABLE.bits();
    }
}

impl Default for BlockKinds {
    fn default() -> Self {
        Self::SIMPLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_case_insensitive() {
        assert_eq!(BlockKind::from_tag("P"), Some(BlockKind::Paragraph));
        assert_eq!(BlockKind::from_tag("BlockQuote"), Some(BlockKind::Blockquote));
        assert_eq!(BlockKind::from_tag("h7"), None);
        assert_eq!(BlockKind::from_tag("div"), None);
    }

    #[test]
    fn test_simple_matches_flag_set() {
        for kind in BlockKind::ALL {
            assert_eq!(kind.is_simple(), BlockKinds::SIMPLE.contains(kind.flag()));
            assert_eq!(!kind.is_simple(), BlockKinds::COMPLEX.contains(kind.flag()));
        }
    }

    #[test]
    fn test_tags_are_unique() {
        for a in BlockKind::ALL {
            let same = BlockKind::ALL.iter().filter(|b| b.tag() == a.tag()).count();
            assert_eq!(same, 1, "duplicate tag {}", a.tag());
        }
    }
}
