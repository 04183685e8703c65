//! Bold and italic spans.
//!
//! `**` pairs are tried before single `*`. A single `*` that touches
//! another `*` on either side never opens or closes italic, so the halves
//! of a `**` run are not misread. Inputs such as `*a**b*c**d*` remain
//! ambiguous; the first match in scan order wins.

use memchr::{memchr, memmem};

use super::Inline;

/// Try to parse `**bold**` starting at `pos`.
pub fn parse_strong(text: &str, pos: usize) -> Option<(Inline, usize)> {
    let bytes = text.as_bytes();
    if !bytes[pos..].starts_with(b"**") {
        return None;
    }
    let start = pos + 2;
    let len = memmem::find(&bytes[start..], b"**")?;
    if len == 0 {
        return None;
    }
    let end = start + len;
    Some((Inline::Bold(text[start..end].to_owned()), end + 2))
}

/// Try to parse `*italic*` starting at `pos`.
pub fn parse_emphasis(text: &str, pos: usize) -> Option<(Inline, usize)> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&b'*') || is_star(bytes, pos + 1) {
        return None;
    }
    if pos > 0 && bytes[pos - 1] == b'*' {
        return None;
    }

    let start = pos + 1;
    let mut search = start;
    while let Some(offset) = memchr(b'*', &bytes[search..]) {
        let close = search + offset;
        if !is_star(bytes, close + 1) && bytes[close - 1] != b'*' {
            if close == start {
                return None;
            }
            return Some((Inline::Italic(text[start..close].to_owned()), close + 1));
        }
        search = close + 1;
    }
    None
}

#[inline]
fn is_star(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos) == Some(&b'*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong() {
        let text = "**bold** tail";
        let (node, end) = parse_strong(text, 0).unwrap();
        assert_eq!(node, Inline::Bold("bold".into()));
        assert_eq!(&text[end..], " tail");
    }

    #[test]
    fn test_strong_unterminated() {
        assert!(parse_strong("**bold", 0).is_none());
    }

    #[test]
    fn test_strong_empty() {
        assert!(parse_strong("****", 0).is_none());
    }

    #[test]
    fn test_emphasis() {
        let text = "*it* tail";
        let (node, end) = parse_emphasis(text, 0).unwrap();
        assert_eq!(node, Inline::Italic("it".into()));
        assert_eq!(&text[end..], " tail");
    }

    #[test]
    fn test_emphasis_rejects_double_star() {
        assert!(parse_emphasis("**bold**", 0).is_none());
        assert!(parse_emphasis("**bold**", 1).is_none());
    }

    #[test]
    fn test_emphasis_skips_inner_double_star() {
        let (node, _) = parse_emphasis("*a**b*", 0).unwrap();
        assert_eq!(node, Inline::Italic("a**b".into()));
    }

    #[test]
    fn test_emphasis_unterminated() {
        assert!(parse_emphasis("*open", 0).is_none());
    }
}
