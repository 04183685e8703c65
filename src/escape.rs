//! HTML escaping and URL helpers.
//!
//! Fast-path optimized: scans for the first escapable character, then
//! bulk-copies segments between escapes. All five of `& < > " '` are
//! escaped everywhere, so the same routine serves text and attributes.

use memchr::{memchr2, memchr3};

/// Lookup table for escapable bytes.
const ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table[b'\'' as usize] = true;
    table
};

/// Escape text for HTML into an output buffer.
///
/// # Example
/// ```
/// use foldmark::escape::escape_html_into;
///
/// let mut out = String::new();
/// escape_html_into(&mut out, "<a href=\"x\">it's</a>");
/// assert_eq!(out, "&lt;a href=&quot;x&quot;&gt;it&#39;s&lt;/a&gt;");
/// ```
pub fn escape_html_into(out: &mut String, input: &str) {
    let bytes = input.as_bytes();
    let Some(first) = first_escape(bytes) else {
        out.push_str(input);
        return;
    };
    out.push_str(&input[..first]);

    let mut pos = first;
    while pos < bytes.len() {
        let scan_start = pos;
        while pos < bytes.len() && !ESCAPE_TABLE[bytes[pos] as usize] {
            pos += 1;
        }
        // Escapable bytes are ASCII, so both ends are char boundaries.
        out.push_str(&input[scan_start..pos]);

        if let Some(&b) = bytes.get(pos) {
            out.push_str(entity_for(b));
            pos += 1;
        }
    }
}

/// Escape text for HTML, returning a new string.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    escape_html_into(&mut out, input);
    out
}

#[inline]
fn entity_for(b: u8) -> &'static str {
    match b {
        b'<' => "&lt;",
        b'>' => "&gt;",
        b'&' => "&amp;",
        b'"' => "&quot;",
        b'\'' => "&#39;",
        _ => unreachable!("only table bytes are escaped"),
    }
}

#[inline]
fn first_escape(bytes: &[u8]) -> Option<usize> {
    let a = memchr3(b'<', b'>', b'&', bytes);
    let b = memchr2(b'"', b'\'', bytes);
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Write a link destination into an attribute value.
///
/// Entities in the source are decoded first so `&amp;` is not double
/// escaped. Spaces and control bytes are percent-encoded; the result is
/// then HTML-escaped.
pub fn escape_url_into(out: &mut String, url: &str) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let decoded = html_escape::decode_html_entities(url);
    let mut encoded = String::with_capacity(decoded.len());
    for c in decoded.chars() {
        match c {
            ' ' => encoded.push_str("%20"),
            '\u{0}'..='\u{1F}' | '\u{7F}' => {
                let b = c as u8;
                encoded.push('%');
                encoded.push(HEX[(b >> 4) as usize] as char);
                encoded.push(HEX[(b & 0xF) as usize] as char);
            }
            _ => encoded.push(c),
        }
    }
    escape_html_into(out, &encoded);
}

/// Whether a URL leaves the current document: absolute `http://`,
/// `https://` or protocol-relative `//`.
pub fn is_external_url(url: &str) -> bool {
    let bytes = url.as_bytes();
    starts_with_ignore_case(bytes, b"http://")
        || starts_with_ignore_case(bytes, b"https://")
        || bytes.starts_with(b"//")
}

/// Whether a URL uses a scheme that can run script.
///
/// `data:` is allowed for image sources only when it carries an image.
/// Entities are decoded first, matching what `escape_url_into` emits.
pub fn is_unsafe_url(url: &str, image: bool) -> bool {
    let decoded = html_escape::decode_html_entities(url);
    // Browsers ignore embedded whitespace and control bytes in the scheme.
    let normalized: Vec<u8> = decoded
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && !b.is_ascii_control())
        .take(16)
        .collect();

    if starts_with_ignore_case(&normalized, b"javascript:") || starts_with_ignore_case(&normalized, b"vbscript:") {
        return true;
    }
    if starts_with_ignore_case(&normalized, b"data:") {
        return !(image && starts_with_ignore_case(&normalized, b"data:image/"));
    }
    false
}

#[inline]
fn starts_with_ignore_case(haystack: &[u8], prefix: &[u8]) -> bool {
    haystack.len() >= prefix.len() && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}
