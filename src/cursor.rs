//! Forward-only byte cursor for block scanning.
//!
//! The cursor never moves backwards past a position that the scanner has
//! already turned into a block. Lookahead is done on copies (`Cursor` is
//! `Copy`), which are committed by assignment once a construct matches.

use crate::Range;

/// A cursor over the bytes of a `&str`.
///
/// # Example
/// ```
/// use foldmark::cursor::Cursor;
///
/// let mut cursor = Cursor::new("Hello, World!");
/// assert_eq!(cursor.peek(), Some(b'H'));
/// cursor.advance(7);
/// assert_eq!(cursor.peek(), Some(b'W'));
/// ```
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `input`.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Create a cursor starting at an offset.
    #[inline]
    pub fn new_at(input: &'a str, offset: usize) -> Self {
        debug_assert!(offset <= input.len());
        Self { input, pos: offset }
    }

    /// Current offset from the start of input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Number of bytes remaining.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peek the current byte without advancing.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Advance by `n` bytes, saturating at end of input.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Advance by one byte.
    #[inline]
    pub fn bump(&mut self) {
        self.advance(1);
    }

    /// Check if the current byte is `b`.
    #[inline]
    pub fn at(&self, b: u8) -> bool {
        self.peek() == Some(b)
    }

    /// Skip while predicate is true, returning the number of bytes skipped.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skip spaces and tabs.
    #[inline]
    pub fn skip_whitespace(&mut self) -> usize {
        self.skip_while(|b| b == b' ' || b == b'\t')
    }

    /// Width of the leading indentation of the current line (tab = 4).
    pub fn indent_width(&self) -> usize {
        let mut width = 0;
        for &b in &self.input.as_bytes()[self.pos..] {
            match b {
                b' ' => width += 1,
                b'\t' => width += 4,
                _ => break,
            }
        }
        width
    }

    /// Offset of the end of the current line (the `\n`, or end of input).
    #[inline]
    pub fn line_end(&self) -> usize {
        match memchr::memchr(b'\n', &self.input.as_bytes()[self.pos..]) {
            Some(n) => self.pos + n,
            None => self.input.len(),
        }
    }

    /// Range of the rest of the current line, without advancing.
    #[inline]
    pub fn peek_line(&self) -> Range {
        Range::from_usize(self.pos, self.line_end())
    }

    /// Consume the rest of the current line including its newline,
    /// returning the range of the line content.
    #[inline]
    pub fn consume_line(&mut self) -> Range {
        let range = self.peek_line();
        self.pos = range.end_usize();
        if self.at(b'\n') {
            self.pos += 1;
        }
        range
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset())
            .field("remaining", &self.remaining())
            .finish()
    }
}
