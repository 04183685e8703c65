//! Parsed documents and render output.

use crate::block::Block;

/// A parsed Markdown document.
///
/// Owns its whole block tree and is immutable once built. Rendering only
/// borrows it, so one document can be rendered any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    blocks: Vec<Block>,
    outline: Vec<OutlineEntry>,
}

/// One heading, as seen by the scanner, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: u8,
    /// Raw heading text.
    pub text: String,
}

impl Document {
    /// Build a document from scanned blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut outline = Vec::new();
        collect_outline(&blocks, &mut outline);
        Self { blocks, outline }
    }

    /// Top-level blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Every heading, including those inside collapsibles.
    pub fn outline(&self) -> &[OutlineEntry] {
        &self.outline
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

fn collect_outline(blocks: &[Block], out: &mut Vec<OutlineEntry>) {
    for block in blocks {
        match block {
            Block::Heading { level, text, .. } => out.push(OutlineEntry {
                level: *level,
                text: text.clone(),
            }),
            Block::Collapsible { children, .. } => collect_outline(children, out),
            Block::Paragraph { .. }
            | Block::Blockquote { .. }
            | Block::List { .. }
            | Block::CodeBlock { .. }
            | Block::HorizontalRule => {}
        }
    }
}

/// Table of contents entry for one rendered heading.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct TocEntry {
    /// Same value as the heading's `id` attribute.
    pub id: String,
    /// Heading text with inline markup removed.
    pub text: String,
    pub level: u8,
}

impl TocEntry {
    pub(crate) fn for_heading(id: String, level: u8, text: String) -> Self {
        Self { id, text, level }
    }
}

/// Output of a render: the HTML fragment and its table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Rendered {
    pub html: String,
    /// One entry per heading, in document order.
    pub toc: Vec<TocEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::scan;

    #[test]
    fn test_outline_in_order() {
        let doc = Document::from_blocks(scan("# One\n\ntext\n\n## Two"));
        let outline: Vec<_> = doc.outline().iter().map(|e| (e.level, e.text.as_str())).collect();
        assert_eq!(outline, vec![(1, "One"), (2, "Two")]);
    }

    #[test]
    fn test_outline_descends_into_collapsibles() {
        let input = "# Top\n<!-- collapsible -->\n## Hidden\n<!-- collapsible -->\n### Deeper\n<!-- /collapsible -->\n<!-- /collapsible -->\n## After";
        let doc = Document::from_blocks(scan(input));
        let texts: Vec<_> = doc.outline().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Top", "Hidden", "Deeper", "After"]);
    }

    #[test]
    fn test_outline_keeps_raw_text() {
        let doc = Document::from_blocks(scan("# Hello **World**"));
        assert_eq!(doc.outline()[0].text, "Hello **World**");
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::from_blocks(Vec::new());
        assert!(doc.is_empty());
        assert!(doc.outline().is_empty());
    }

    #[test]
    fn test_document_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document>();
        assert_send_sync::<Rendered>();
    }
}
