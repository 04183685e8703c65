//! Inline node types.

/// A span-level node produced by the inline parser.
///
/// Every variant holds raw source text. Nothing is escaped here; escaping
/// happens when the node is written as HTML. Span contents are opaque: the
/// text inside `Bold`, `Italic` or a link is never scanned again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Plain text.
    Text(String),
    /// `**bold**`
    Bold(String),
    /// `*italic*`
    Italic(String),
    /// `` `code` ``
    InlineCode(String),
    /// `[text](url)`
    Link {
        text: String,
        url: String,
    },
    /// `![alt](url)`
    Image {
        alt: String,
        url: String,
    },
}

impl Inline {
    /// The visible text of this node with all markup dropped.
    ///
    /// Images contribute their alt text.
    pub fn plain_text(&self) -> &str {
        match self {
            Inline::Text(s) | Inline::Bold(s) | Inline::Italic(s) | Inline::InlineCode(s) => s,
            Inline::Link { text, .. } => text,
            Inline::Image { alt, .. } => alt,
        }
    }
}

/// Concatenate the visible text of a run of inline nodes.
pub fn plain_text(nodes: &[Inline]) -> String {
    let mut out = String::new();
    for node in nodes {
        out.push_str(node.plain_text());
    }
    out
}
