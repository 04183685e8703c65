//! Inline span parser.
//!
//! Single left-to-right pass. At every position that can open a span the
//! candidates are tried in precedence order:
//! 1. image `![alt](url)`
//! 2. link `[text](url)`
//! 3. code span `` `code` ``
//! 4. bold `**text**`
//! 5. italic `*text*`
//!
//! Everything else accumulates into plain text. An opener that finds no
//! closer stays literal and the scan resumes right after it, so malformed
//! markup can never abort parsing.

mod code_span;
mod emphasis;
mod links;
mod node;

pub use node::{Inline, plain_text};

use memchr::{memchr, memchr3};

use code_span::parse_code_span;
use emphasis::{parse_emphasis, parse_strong};
use links::{parse_image, parse_link};

/// Parse a block's text into inline nodes.
///
/// # Example
/// ```
/// use foldmark::inline::{parse_inline, Inline};
///
/// let nodes = parse_inline("**bold** and *italic*");
/// assert_eq!(nodes[0], Inline::Bold("bold".into()));
/// assert_eq!(nodes[2], Inline::Italic("italic".into()));
/// ```
pub fn parse_inline(text: &str) -> Vec<Inline> {
    InlineParser::new(text).parse()
}

/// Inline parser state for one block of text.
pub struct InlineParser<'a> {
    text: &'a str,
    /// Scan position.
    pos: usize,
    /// Start of the pending plain-text run.
    text_start: usize,
    nodes: Vec<Inline>,
}

impl<'a> InlineParser<'a> {
    /// Create a parser over `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            text_start: 0,
            nodes: Vec::new(),
        }
    }

    /// Run the scan and return the nodes.
    pub fn parse(mut self) -> Vec<Inline> {
        let bytes = self.text.as_bytes();
        while let Some(candidate) = next_special(bytes, self.pos) {
            self.pos = candidate;
            match self.try_span(candidate) {
                Some((node, end)) => {
                    self.flush_text(candidate);
                    self.nodes.push(node);
                    self.pos = end;
                    self.text_start = end;
                }
                None => self.pos += 1,
            }
        }
        self.flush_text(self.text.len());
        self.nodes
    }

    /// Try every span kind that can start with the byte at `pos`.
    fn try_span(&self, pos: usize) -> Option<(Inline, usize)> {
        match self.text.as_bytes()[pos] {
            b'!' => parse_image(self.text, pos),
            b'[' => parse_link(self.text, pos),
            b'`' => parse_code_span(self.text, pos),
            b'*' => parse_strong(self.text, pos).or_else(|| parse_emphasis(self.text, pos)),
            _ => None,
        }
    }

    /// Emit the pending plain-text run up to `end`.
    fn flush_text(&mut self, end: usize) {
        if end <= self.text_start {
            return;
        }
        let run = &self.text[self.text_start..end];
        // Adjacent literal runs (e.g. after a rejected opener) merge.
        if let Some(Inline::Text(prev)) = self.nodes.last_mut() {
            prev.push_str(run);
        } else {
            self.nodes.push(Inline::Text(run.to_owned()));
        }
        self.text_start = end;
    }
}

/// Offset of the next byte at or after `from` that can open a span.
#[inline]
fn next_special(bytes: &[u8], from: usize) -> Option<usize> {
    let rest = bytes.get(from..)?;
    let a = memchr3(b'[', b'`', b'*', rest);
    let b = memchr(b'!', rest);
    min_opt(a, b).map(|offset| from + offset)
}

#[inline]
fn min_opt(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
