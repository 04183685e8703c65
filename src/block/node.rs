//! Block node types.

use crate::inline::Inline;

/// A block-level node.
///
/// The tree owns all of its descendants. Every consumer matches the enum
/// exhaustively, so adding a variant is a compile error at each site that
/// has to handle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX heading. `level` is always in `1..=6`.
    Heading {
        level: u8,
        /// Raw heading text, markup included.
        text: String,
        inline: Vec<Inline>,
    },
    Paragraph {
        inline: Vec<Inline>,
    },
    /// One run of `>` lines; the stripped lines are joined with `\n`.
    Blockquote {
        inline: Vec<Inline>,
    },
    List {
        ordered: bool,
        /// Number of the first item (1 for unordered lists).
        start: u32,
        items: Vec<ListItem>,
    },
    /// Fenced code. `raw_content` is never inline-parsed.
    CodeBlock {
        /// Info string after the opening fence, possibly empty.
        language: String,
        raw_content: String,
    },
    HorizontalRule,
    /// Container delimited by collapsible start/end markers.
    Collapsible {
        /// Text given on the start marker, possibly empty.
        summary: String,
        children: Vec<Block>,
    },
}

/// A single list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub inline: Vec<Inline>,
}

impl Block {
    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Blockquote { .. } => "blockquote",
            Block::List { .. } => "list",
            Block::CodeBlock { .. } => "code block",
            Block::HorizontalRule => "horizontal rule",
            Block::Collapsible { .. } => "collapsible",
        }
    }
}
