//! Link and image parsing.
//!
//! Handles:
//! - Inline links: `[text](url)`
//! - Images: `![alt](url)`
//!
//! The bracketed segment may contain one level of nested brackets. The
//! destination runs to the `)` that balances the opening `(`.

use crate::Range;
use crate::limits;

use super::Inline;

/// Try to parse a link whose `[` is at `pos`.
///
/// Returns the node and the offset just past the closing `)`.
pub fn parse_link(text: &str, pos: usize) -> Option<(Inline, usize)> {
    let (label, url, end) = parse_bracketed(text, pos)?;
    Some((
        Inline::Link {
            text: label.slice(text).to_owned(),
            url: url.slice(text).to_owned(),
        },
        end,
    ))
}

/// Try to parse an image whose `!` is at `pos`.
pub fn parse_image(text: &str, pos: usize) -> Option<(Inline, usize)> {
    if text.as_bytes().get(pos + 1) != Some(&b'[') {
        return None;
    }
    let (alt, url, end) = parse_bracketed(text, pos + 1)?;
    Some((
        Inline::Image {
            alt: alt.slice(text).to_owned(),
            url: url.slice(text).to_owned(),
        },
        end,
    ))
}

/// Parse `[label](destination)` starting at the `[` at `open`.
///
/// Returns (label range, trimmed destination range, end offset).
fn parse_bracketed(text: &str, open: usize) -> Option<(Range, Range, usize)> {
    let bytes = text.as_bytes();
    let close = find_closing_bracket(bytes, open)?;
    if bytes.get(close + 1) != Some(&b'(') {
        return None;
    }
    let (url, end) = parse_destination(text, close + 1)?;
    Some((Range::from_usize(open + 1, close), url, end))
}

/// Find the `]` that closes the `[` at `open`, allowing nested pairs up to
/// [`limits::MAX_BRACKET_DEPTH`].
fn find_closing_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    debug_assert_eq!(bytes[open], b'[');
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'[' => {
                depth += 1;
                if depth > limits::MAX_BRACKET_DEPTH {
                    return None;
                }
            }
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'\n' => return None,
            _ => {}
        }
    }
    None
}

/// Parse a link destination starting at the `(` at `open_paren`.
fn parse_destination(text: &str, open_paren: usize) -> Option<(Range, usize)> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open_paren) {
        match b {
            b'(' => {
                depth += 1;
                if depth > limits::MAX_LINK_PAREN_DEPTH {
                    return None;
                }
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    let url = Range::from_usize(open_paren + 1, i).trim(text);
                    return Some((url, i + 1));
                }
            }
            b'\n' => return None,
            _ => {}
        }
    }
    None
}
