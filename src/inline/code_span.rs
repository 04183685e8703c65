//! Code span parsing.
//!
//! Only single-backtick spans are recognized. The content is taken
//! verbatim up to the next backtick.

use memchr::memchr;

use super::Inline;

/// Try to parse a code span whose opening backtick is at `pos`.
pub fn parse_code_span(text: &str, pos: usize) -> Option<(Inline, usize)> {
    let start = pos + 1;
    let len = memchr(b'`', &text.as_bytes()[start..])?;
    if len == 0 {
        return None;
    }
    let end = start + len;
    Some((Inline::InlineCode(text[start..end].to_owned()), end + 1))
}
