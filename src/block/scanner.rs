//! Block scanner implementation.

use smallvec::SmallVec;

use crate::Range;
use crate::cursor::Cursor;
use crate::inline::parse_inline;
use crate::limits;

use super::node::{Block, ListItem};

/// Opening and closing code fence.
const FENCE: &str = "```";

/// Body of the collapsible start marker comment.
const COLLAPSIBLE_OPEN: &str = "collapsible";

/// Body of the collapsible end marker comment.
const COLLAPSIBLE_CLOSE: &str = "/collapsible";

/// Scan `text` into a sequence of blocks.
///
/// # Example
/// ```
/// use foldmark::block::{scan, Block};
///
/// let blocks = scan("# Title\n\nBody text.");
/// assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
/// assert!(matches!(blocks[1], Block::Paragraph { .. }));
/// ```
pub fn scan(text: &str) -> Vec<Block> {
    BlockScanner::new(text).scan()
}

/// What the line at a given offset starts.
///
/// Classification follows a fixed precedence: fence, collapsible marker,
/// heading, horizontal rule, blockquote, list marker, paragraph text.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    Blank,
    Fence {
        language: Range,
    },
    CollapsibleStart {
        summary: Range,
    },
    CollapsibleEnd,
    Heading {
        level: u8,
        text: Range,
    },
    Rule,
    Quote,
    ListItem(ListMarker),
    Text,
}

/// A recognized list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListMarker {
    /// Indentation width before the marker.
    indent: usize,
    ordered: bool,
    /// The marker's number (ordered lists only).
    number: u32,
    /// Item text after the marker, trimmed.
    content: Range,
}

/// Block scanner state.
///
/// One scanner owns one forward cursor. Collapsible bodies are scanned by
/// a fresh nested scanner over the body slice, so no state is shared
/// between levels.
pub struct BlockScanner<'a> {
    input: &'a str,
    cursor: Cursor<'a>,
    /// Collapsible nesting depth of this scanner's input.
    depth: usize,
    blocks: Vec<Block>,
}

impl<'a> BlockScanner<'a> {
    /// Create a scanner over a whole document.
    pub fn new(input: &'a str) -> Self {
        Self::nested(input, 0)
    }

    fn nested(input: &'a str, depth: usize) -> Self {
        Self {
            input,
            cursor: Cursor::new(input),
            depth,
            blocks: Vec::new(),
        }
    }

    /// Scan all blocks.
    pub fn scan(mut self) -> Vec<Block> {
        while !self.cursor.is_eof() {
            self.scan_block();
        }
        self.blocks
    }

    /// Classify the line under the cursor and consume one block.
    ///
    /// Every branch consumes at least one line, so the loop in `scan`
    /// always terminates.
    fn scan_block(&mut self) {
        match classify_line(self.input, self.cursor.offset()) {
            LineKind::Blank => {
                self.cursor.consume_line();
            }
            LineKind::Fence { language } => self.scan_fence(language),
            LineKind::CollapsibleStart { summary } => {
                if self.depth >= limits::MAX_COLLAPSIBLE_NESTING {
                    trace!("collapsible nesting cap reached, dropping start marker");
                    self.cursor.consume_line();
                } else {
                    self.scan_collapsible(summary);
                }
            }
            LineKind::CollapsibleEnd => {
                trace!("dropping collapsible end marker with no open container");
                self.cursor.consume_line();
            }
            LineKind::Heading { level, text } => {
                self.cursor.consume_line();
                let text = text.slice(self.input);
                self.blocks.push(Block::Heading {
                    level,
                    text: text.to_owned(),
                    inline: parse_inline(text),
                });
            }
            LineKind::Rule => {
                self.cursor.consume_line();
                self.blocks.push(Block::HorizontalRule);
            }
            LineKind::Quote => self.scan_blockquote(),
            LineKind::ListItem(marker) => self.scan_list(marker),
            LineKind::Text => self.scan_paragraph(),
        }
    }

    /// Consume a fenced code block. The opening fence is under the cursor.
    fn scan_fence(&mut self, language: Range) {
        self.cursor.consume_line();
        let content_start = self.cursor.offset();
        let mut content_end = self.input.len();
        let mut closed = false;

        while !self.cursor.is_eof() {
            let line_start = self.cursor.offset();
            let line = self.cursor.consume_line();
            if line.trim(self.input).slice(self.input) == FENCE {
                content_end = line_start;
                closed = true;
                break;
            }
        }
        if !closed {
            trace!("unterminated code fence at offset {content_start}, consuming to end of input");
        }

        let raw = strip_one_trailing_newline(&self.input[content_start..content_end]);
        self.blocks.push(Block::CodeBlock {
            language: language.slice(self.input).to_owned(),
            raw_content: raw.to_owned(),
        });
    }

    /// Consume a collapsible container and scan its body recursively.
    fn scan_collapsible(&mut self, summary: Range) {
        self.cursor.consume_line();
        let body_start = self.cursor.offset();
        let mut body_end = self.input.len();
        let mut depth = 1usize;
        let mut in_fence = false;

        while !self.cursor.is_eof() {
            let line_start = self.cursor.offset();
            let line = self.cursor.consume_line().trim(self.input).slice(self.input);
            if in_fence {
                in_fence = line != FENCE;
                continue;
            }
            if line.starts_with(FENCE) {
                in_fence = true;
                continue;
            }
            match marker_body(line) {
                Some(MarkerBody::Open(_)) => depth += 1,
                Some(MarkerBody::Close) => {
                    depth -= 1;
                    if depth == 0 {
                        body_end = line_start;
                        break;
                    }
                }
                None => {}
            }
        }
        if depth > 0 {
            trace!("unterminated collapsible at offset {body_start}, using rest of input");
        }

        let children = BlockScanner::nested(&self.input[body_start..body_end], self.depth + 1).scan();
        self.blocks.push(Block::Collapsible {
            summary: summary.slice(self.input).to_owned(),
            children,
        });
    }

    /// Consume a run of `>` lines as one blockquote.
    fn scan_blockquote(&mut self) {
        let mut lines: SmallVec<[&str; 8]> = SmallVec::new();

        while !self.cursor.is_eof() {
            let mut ahead = self.cursor;
            ahead.skip_whitespace();
            if !ahead.at(b'>') {
                break;
            }
            ahead.bump();
            if ahead.at(b' ') {
                ahead.bump();
            }
            self.cursor = ahead;
            let line = self.cursor.consume_line();
            lines.push(trim_end(line.slice(self.input)));
        }

        let text = lines.join("\n");
        self.blocks.push(Block::Blockquote {
            inline: parse_inline(&text),
        });
    }

    /// Consume a list. The first marker line is under the cursor.
    fn scan_list(&mut self, first: ListMarker) {
        let mut items: Vec<String> = Vec::new();

        while !self.cursor.is_eof() {
            let line_start = self.cursor.offset();
            match classify_line(self.input, line_start) {
                LineKind::Blank => break,
                LineKind::ListItem(marker) => {
                    if marker.indent != first.indent || marker.ordered != first.ordered {
                        break;
                    }
                    self.cursor.consume_line();
                    items.push(marker.content.slice(self.input).to_owned());
                }
                // Fences and markers keep their meaning at any indent, as
                // the collapsible matcher sees them.
                LineKind::Fence { .. } | LineKind::CollapsibleStart { .. } | LineKind::CollapsibleEnd => break,
                _ => {
                    let deeper = self.cursor.indent_width() > first.indent;
                    let Some(item) = items.last_mut().filter(|_| deeper) else {
                        break;
                    };
                    let line = self.cursor.consume_line().trim(self.input);
                    item.push('\n');
                    item.push_str(line.slice(self.input));
                }
            }
        }

        self.blocks.push(Block::List {
            ordered: first.ordered,
            start: if first.ordered { first.number } else { 1 },
            items: items
                .iter()
                .map(|text| ListItem {
                    inline: parse_inline(text),
                })
                .collect(),
        });
    }

    /// Consume paragraph lines until a blank line or another block starts.
    fn scan_paragraph(&mut self) {
        let mut lines: SmallVec<[&str; 8]> = SmallVec::new();

        loop {
            let line = self.cursor.consume_line().trim(self.input);
            lines.push(line.slice(self.input));
            if self.cursor.is_eof()
                || classify_line(self.input, self.cursor.offset()) != LineKind::Text
            {
                break;
            }
        }

        let text = lines.join(" ");
        self.blocks.push(Block::Paragraph {
            inline: parse_inline(&text),
        });
    }
}

/// Classify the line starting at `offset`.
fn classify_line(input: &str, offset: usize) -> LineKind {
    let mut cursor = Cursor::new_at(input, offset);
    let indent = cursor.indent_width();
    cursor.skip_whitespace();
    let content = cursor.peek_line().trim(input);
    let line = content.slice(input);

    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with(FENCE) {
        let language = Range::from_usize(content.start_usize() + FENCE.len(), content.end_usize());
        return LineKind::Fence {
            language: language.trim(input),
        };
    }
    if let Some(body) = marker_body(line) {
        return match body {
            MarkerBody::Open(summary) => {
                // `summary` is a subslice of `line`; recover its offsets.
                let start = content.start_usize() + (summary.as_ptr() as usize - line.as_ptr() as usize);
                LineKind::CollapsibleStart {
                    summary: Range::from_usize(start, start + summary.len()),
                }
            }
            MarkerBody::Close => LineKind::CollapsibleEnd,
        };
    }
    if let Some((level, text)) = heading(line) {
        let start = content.start_usize() + text;
        return LineKind::Heading {
            level,
            text: Range::from_usize(start, content.end_usize()).trim(input),
        };
    }
    if is_rule(line) {
        return LineKind::Rule;
    }
    if line.starts_with('>') {
        return LineKind::Quote;
    }
    if let Some((ordered, number, text)) = list_marker(line) {
        let start = content.start_usize() + text;
        return LineKind::ListItem(ListMarker {
            indent,
            ordered,
            number,
            content: Range::from_usize(start, content.end_usize()).trim(input),
        });
    }
    LineKind::Text
}

/// Body of a collapsible marker comment.
enum MarkerBody<'a> {
    Open(&'a str),
    Close,
}

/// Recognize `<!-- collapsible -->`, `<!-- collapsible: Summary -->` and
/// `<!-- /collapsible -->` on a trimmed line.
fn marker_body(line: &str) -> Option<MarkerBody<'_>> {
    let body = line.strip_prefix("<!--")?.strip_suffix("-->")?.trim();
    if body == COLLAPSIBLE_CLOSE {
        return Some(MarkerBody::Close);
    }
    let rest = body.strip_prefix(COLLAPSIBLE_OPEN)?;
    if rest.is_empty() {
        return Some(MarkerBody::Open(rest));
    }
    rest.strip_prefix(':').map(|summary| MarkerBody::Open(summary.trim()))
}

/// Parse an ATX heading marker: `#`+ then a space or tab.
///
/// Returns the clamped level and the offset where the text begins.
fn heading(line: &str) -> Option<(u8, usize)> {
    let bytes = line.as_bytes();
    let hashes = bytes.iter().take_while(|&&b| b == b'#').count();
    if hashes == 0 || !matches!(bytes.get(hashes), Some(b' ' | b'\t')) {
        return None;
    }
    let level = hashes.min(limits::MAX_HEADING_LEVEL as usize) as u8;
    Some((level, hashes + 1))
}

/// A line of three or more of the same `-`, `*` or `_`, optionally
/// separated by spaces or tabs, and nothing else.
fn is_rule(line: &str) -> bool {
    let bytes = line.as_bytes();
    let marker = match bytes.first() {
        Some(&b @ (b'-' | b'*' | b'_')) => b,
        _ => return false,
    };
    let mut count = 0;
    for &b in bytes {
        if b == marker {
            count += 1;
        } else if b != b' ' && b != b'\t' {
            return false;
        }
    }
    count >= 3
}

/// Parse a list marker on a line with leading whitespace removed.
///
/// Returns (ordered, number, offset where the item text begins).
fn list_marker(line: &str) -> Option<(bool, u32, usize)> {
    let bytes = line.as_bytes();
    let is_gap = |at: usize| matches!(bytes.get(at), Some(b' ' | b'\t'));

    match bytes.first()? {
        b'-' | b'*' | b'+' if is_gap(1) => Some((false, 1, 2)),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > limits::MAX_LIST_MARKER_DIGITS
                || bytes.get(digits) != Some(&b'.')
                || !is_gap(digits + 1)
            {
                return None;
            }
            let number = line[..digits].parse().ok()?;
            Some((true, number, digits + 2))
        }
        _ => None,
    }
}

/// Drop a single trailing line break (`\n` or `\r\n`).
fn strip_one_trailing_newline(text: &str) -> &str {
    match text.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => text,
    }
}

#[inline]
fn trim_end(line: &str) -> &str {
    line.trim_end_matches([' ', '\t', '\r'])
}
