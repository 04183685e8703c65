//! foldmark: a small Markdown dialect compiled to an HTML fragment plus a
//! table of contents.
//!
//! The dialect covers headings, paragraphs, blockquotes, one-level lists,
//! fenced code with syntax highlighting, horizontal rules, collapsible
//! sections, and the inline spans bold, italic, code, links and images.
//!
//! # Design Principles
//! - Two phases: `parse` builds an owned block tree, `render` walks it
//! - One forward cursor per scan: every step consumes input, so parsing
//!   always terminates
//! - Malformed markup degrades to text; nothing here returns an error
//! - No shared state: each call owns its buffers
//!
//! # Example
//! ```
//! let out = foldmark::convert("# Hello\n\nSome *text*.");
//! assert_eq!(out.html, "<h1 id=\"hello\">Hello</h1>\n<p>Some <em>text</em>.</p>\n");
//! assert_eq!(out.toc[0].id, "hello");
//! ```

/// Diagnostic tracing, compiled in only with the `trace` feature.
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "trace")]
        log::trace!($($arg)*);
    }};
}

pub mod block;
pub mod cursor;
pub mod document;
pub mod escape;
pub mod highlight;
pub mod inline;
pub mod limits;
pub mod range;
pub mod render;
pub mod slug;

pub use block::{Block, BlockScanner, ListItem};
pub use document::{Document, OutlineEntry, Rendered, TocEntry};
pub use inline::{Inline, InlineParser};
pub use range::Range;
pub use render::HtmlWriter;
pub use slug::{SlugRegistry, slug};

use escape::{escape_html, is_external_url, is_unsafe_url};
use inline::plain_text;

/// Rendering options.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Run the syntax highlighter on fenced code.
    pub highlight: bool,
    /// Suffix repeated heading ids with `-1`, `-2`, ...
    pub unique_heading_ids: bool,
    /// Open external links in a new tab.
    pub external_links_new_tab: bool,
    /// Replace script-capable link and image URLs with `#`.
    pub sanitize_urls: bool,
    /// Text of each code block's copy button.
    pub copy_button_label: &'static str,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            highlight: true,
            unique_heading_ids: false,
            external_links_new_tab: true,
            sanitize_urls: true,
            copy_button_label: "Copy",
        }
    }
}

/// Parse Markdown into a document tree.
///
/// # Example
/// ```
/// let doc = foldmark::parse("# Title\n\n- a\n- b");
/// assert_eq!(doc.blocks().len(), 2);
/// assert_eq!(doc.outline()[0].text, "Title");
/// ```
pub fn parse(text: &str) -> Document {
    Document::from_blocks(block::scan(clamp_input(text, limits::MAX_INPUT_LEN)))
}

/// Cut `text` to at most `cap` bytes, backing off to a char boundary.
fn clamp_input(text: &str, cap: usize) -> &str {
    if text.len() <= cap {
        return text;
    }
    let mut end = cap;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    trace!("input of {} bytes truncated to {end}", text.len());
    &text[..end]
}

/// Render a document with default options.
pub fn render(doc: &Document) -> Rendered {
    render_with_options(doc, &Options::default())
}

/// Render a document.
pub fn render_with_options(doc: &Document, options: &Options) -> Rendered {
    let mut renderer = Renderer::new(options);
    renderer.blocks(doc.blocks());
    renderer.finish()
}

/// Parse and render in one step.
pub fn convert(text: &str) -> Rendered {
    render(&parse(text))
}

/// Parse and render with options in one step.
pub fn convert_with_options(text: &str, options: &Options) -> Rendered {
    render_with_options(&parse(text), options)
}

/// Convert Markdown to an HTML fragment, dropping the TOC.
///
/// # Example
/// ```
/// let html = foldmark::to_html("**bold** move");
/// assert_eq!(html, "<p><strong>bold</strong> move</p>\n");
/// ```
pub fn to_html(text: &str) -> String {
    convert(text).html
}

/// Per-render state: output buffer, collected TOC, id and counter state.
struct Renderer<'o> {
    options: &'o Options,
    writer: HtmlWriter,
    toc: Vec<TocEntry>,
    ids: SlugRegistry,
    code_blocks: usize,
    collapsibles: usize,
}

impl<'o> Renderer<'o> {
    fn new(options: &'o Options) -> Self {
        Self {
            options,
            writer: HtmlWriter::new(),
            toc: Vec::new(),
            ids: SlugRegistry::new(options.unique_heading_ids),
            code_blocks: 0,
            collapsibles: 0,
        }
    }

    fn finish(self) -> Rendered {
        Rendered {
            html: self.writer.into_string(),
            toc: self.toc,
        }
    }

    fn blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.block(block);
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading { level, inline, .. } => {
                let text = plain_text(inline);
                let id = self.ids.id_for(&text);
                self.writer.heading_start(*level, &id);
                self.inline(inline);
                self.writer.heading_end(*level);
                self.toc.push(TocEntry::for_heading(id, *level, text));
            }
            Block::Paragraph { inline } => {
                self.writer.paragraph_start();
                self.inline(inline);
                self.writer.paragraph_end();
            }
            Block::Blockquote { inline } => {
                self.writer.blockquote_start();
                self.inline(inline);
                self.writer.blockquote_end();
            }
            Block::List {
                ordered,
                start,
                items,
            } => {
                if *ordered {
                    self.writer.ol_start(*start);
                } else {
                    self.writer.ul_start();
                }
                for item in items {
                    self.writer.li_start();
                    self.inline(&item.inline);
                    self.writer.li_end();
                }
                if *ordered {
                    self.writer.ol_end();
                } else {
                    self.writer.ul_end();
                }
            }
            Block::CodeBlock {
                language,
                raw_content,
            } => self.code_block(language, raw_content),
            Block::HorizontalRule => self.writer.thematic_break(),
            Block::Collapsible { summary, children } => {
                let index = self.collapsibles;
                self.collapsibles += 1;
                let summary = if summary.is_empty() { "Details" } else { summary.as_str() };
                self.writer.collapsible_start(index, summary);
                self.blocks(children);
                self.writer.collapsible_end();
            }
        }
    }

    fn code_block(&mut self, language: &str, raw_content: &str) {
        let index = self.code_blocks;
        self.code_blocks += 1;
        let language = language.split_whitespace().next().unwrap_or("");

        self.writer
            .code_block_start(index, language, self.options.copy_button_label);
        let escaped = escape_html(raw_content);
        if self.options.highlight {
            self.writer.write_str(&highlight::highlight(&escaped, language));
        } else {
            self.writer.write_str(&escaped);
        }
        self.writer.code_block_end();
    }

    fn inline(&mut self, nodes: &[Inline]) {
        for node in nodes {
            match node {
                Inline::Text(text) => self.writer.write_escaped_text(text),
                Inline::Bold(text) => self.writer.strong(text),
                Inline::Italic(text) => self.writer.em(text),
                Inline::InlineCode(text) => self.writer.inline_code(text),
                Inline::Link { text, url } => {
                    let url = self.safe_url(url, false);
                    let new_tab = self.options.external_links_new_tab && is_external_url(url);
                    self.writer.link_start(url, new_tab);
                    self.writer.write_escaped_text(text);
                    self.writer.link_end();
                }
                Inline::Image { alt, url } => {
                    let url = self.safe_url(url, true);
                    self.writer.image(url, alt);
                }
            }
        }
    }

    fn safe_url<'u>(&self, url: &'u str, image: bool) -> &'u str {
        if self.options.sanitize_urls && is_unsafe_url(url, image) {
            trace!("replacing unsafe url {url:?}");
            "#"
        } else {
            url
        }
    }
}
