//! HTML output writer.
//!
//! One helper per element of the output fragment. Callers pass raw text;
//! the writer escapes it. Anything written through `write_str` is trusted
//! markup and goes out unchanged.

use crate::escape;

/// HTML output writer with a pre-allocated, reusable buffer.
///
/// # Example
/// ```
/// use foldmark::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.paragraph_start();
/// writer.write_escaped_text("Hello <World>");
/// writer.paragraph_end();
///
/// assert_eq!(writer.into_string(), "<p>Hello &lt;World&gt;</p>\n");
/// ```
pub struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(1024),
        }
    }

    /// Write trusted markup.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    #[inline]
    pub fn write_char(&mut self, c: char) {
        self.out.push(c);
    }

    /// Write text with HTML escaping. Also safe inside quoted attributes.
    #[inline]
    pub fn write_escaped_text(&mut self, text: &str) {
        escape::escape_html_into(&mut self.out, text);
    }

    /// Write a URL into an attribute value.
    #[inline]
    pub fn write_escaped_url(&mut self, url: &str) {
        escape::escape_url_into(&mut self.out, url);
    }

    #[inline]
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Clear output for reuse (keeps capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.out.clear();
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    // --- Block elements ---

    /// Write paragraph start: `<p>`
    #[inline]
    pub fn paragraph_start(&mut self) {
        self.write_str("<p>");
    }

    /// Write paragraph end: `</p>\n`
    #[inline]
    pub fn paragraph_end(&mut self) {
        self.write_str("</p>\n");
    }

    /// Write heading start: `<hN id="ID">`
    #[inline]
    pub fn heading_start(&mut self, level: u8, id: &str) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("<h");
        self.write_char(char::from(b'0' + level));
        self.write_str(" id=\"");
        self.write_escaped_text(id);
        self.write_str("\">");
    }

    /// Write heading end: `</hN>\n`
    #[inline]
    pub fn heading_end(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("</h");
        self.write_char(char::from(b'0' + level));
        self.write_str(">\n");
    }

    #[inline]
    pub fn blockquote_start(&mut self) {
        self.write_str("<blockquote>");
    }

    #[inline]
    pub fn blockquote_end(&mut self) {
        self.write_str("</blockquote>\n");
    }

    #[inline]
    pub fn ul_start(&mut self) {
        self.write_str("<ul>\n");
    }

    #[inline]
    pub fn ul_end(&mut self) {
        self.write_str("</ul>\n");
    }

    /// Write list start (ordered): `<ol>\n` or `<ol start="N">\n`
    #[inline]
    pub fn ol_start(&mut self, start: u32) {
        if start == 1 {
            self.write_str("<ol>\n");
        } else {
            self.write_str("<ol start=\"");
            self.write_u32(start);
            self.write_str("\">\n");
        }
    }

    #[inline]
    pub fn ol_end(&mut self) {
        self.write_str("</ol>\n");
    }

    #[inline]
    pub fn li_start(&mut self) {
        self.write_str("<li>");
    }

    #[inline]
    pub fn li_end(&mut self) {
        self.write_str("</li>\n");
    }

    /// Write thematic break: `<hr />\n`
    #[inline]
    pub fn thematic_break(&mut self) {
        self.write_str("<hr />\n");
    }

    /// Open a code block container, its copy button and the `<pre><code>`.
    ///
    /// `index` numbers code blocks within one render and ties the button to
    /// its `<code>` element. The caller writes the (escaped) body next.
    pub fn code_block_start(&mut self, index: usize, language: &str, copy_label: &str) {
        self.write_str("<div class=\"code-block\"");
        if !language.is_empty() {
            self.write_str(" data-language=\"");
            self.write_escaped_text(language);
            self.write_char('"');
        }
        self.write_str("><button type=\"button\" class=\"copy-button\" data-copy-target=\"code-block-");
        self.write_usize(index);
        self.write_str("\">");
        self.write_escaped_text(copy_label);
        self.write_str("</button><pre><code id=\"code-block-");
        self.write_usize(index);
        self.write_char('"');
        if !language.is_empty() {
            self.write_str(" class=\"language-");
            self.write_escaped_text(language);
            self.write_char('"');
        }
        self.write_char('>');
    }

    /// Write code block end: `</code></pre></div>\n`
    #[inline]
    pub fn code_block_end(&mut self) {
        self.write_str("</code></pre></div>\n");
    }

    /// Open a collapsible container with its toggle button.
    pub fn collapsible_start(&mut self, index: usize, summary: &str) {
        self.write_str("<div class=\"collapsible\" id=\"collapsible-");
        self.write_usize(index);
        self.write_str("\"><button type=\"button\" class=\"collapsible-toggle\" aria-expanded=\"true\" data-toggle-target=\"collapsible-");
        self.write_usize(index);
        self.write_str("-content\">");
        self.write_escaped_text(summary);
        self.write_str("</button><div class=\"collapsible-content\" id=\"collapsible-");
        self.write_usize(index);
        self.write_str("-content\">\n");
    }

    #[inline]
    pub fn collapsible_end(&mut self) {
        self.write_str("</div></div>\n");
    }

    // --- Inline elements ---

    /// Write inline code: `<code>escaped_content</code>`
    #[inline]
    pub fn inline_code(&mut self, content: &str) {
        self.write_str("<code>");
        self.write_escaped_text(content);
        self.write_str("</code>");
    }

    #[inline]
    pub fn strong(&mut self, content: &str) {
        self.write_str("<strong>");
        self.write_escaped_text(content);
        self.write_str("</strong>");
    }

    #[inline]
    pub fn em(&mut self, content: &str) {
        self.write_str("<em>");
        self.write_escaped_text(content);
        self.write_str("</em>");
    }

    /// Write link start: `<a href="url">`, plus new-tab attributes when
    /// `new_tab` is set.
    #[inline]
    pub fn link_start(&mut self, url: &str, new_tab: bool) {
        self.write_str("<a href=\"");
        self.write_escaped_url(url);
        if new_tab {
            self.write_str("\" target=\"_blank\" rel=\"noopener noreferrer");
        }
        self.write_str("\">");
    }

    /// Write link end: `</a>`
    #[inline]
    pub fn link_end(&mut self) {
        self.write_str("</a>");
    }

    /// Write an image with the expandable marker class.
    #[inline]
    pub fn image(&mut self, src: &str, alt: &str) {
        self.write_str("<img src=\"");
        self.write_escaped_url(src);
        self.write_str("\" alt=\"");
        self.write_escaped_text(alt);
        self.write_str("\" class=\"expandable-image\" />");
    }

    fn write_usize(&mut self, n: usize) {
        self.write_u64(n as u64);
    }

    fn write_u32(&mut self, n: u32) {
        self.write_u64(u64::from(n));
    }

    /// Write an integer as decimal.
    fn write_u64(&mut self, mut n: u64) {
        if n == 0 {
            self.write_char('0');
            return;
        }

        let mut buf = [0u8; 20]; // Max digits for u64
        let mut i = buf.len();

        while n > 0 {
            i -= 1;
            buf[i] = b'0' + (n % 10) as u8;
            n /= 10;
        }

        for &digit in &buf[i..] {
            self.write_char(char::from(digit));
        }
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_new() {
        let writer = HtmlWriter::new();
        assert!(writer.is_empty());
    }

    #[test]
    fn test_writer_escaped_text() {
        let mut writer = HtmlWriter::new();
        writer.write_escaped_text("<script>alert('x')</script>");
        assert_eq!(writer.as_str(), "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;");
    }

    #[test]
    fn test_writer_heading() {
        let mut writer = HtmlWriter::new();
        writer.heading_start(2, "intro");
        writer.write_escaped_text("Intro");
        writer.heading_end(2);
        assert_eq!(writer.as_str(), "<h2 id=\"intro\">Intro</h2>\n");
    }

    #[test]
    fn test_writer_code_block() {
        let mut writer = HtmlWriter::new();
        writer.code_block_start(0, "rust", "Copy");
        writer.write_escaped_text("fn main() {}");
        writer.code_block_end();
        assert_eq!(
            writer.as_str(),
            "<div class=\"code-block\" data-language=\"rust\">\
             <button type=\"button\" class=\"copy-button\" data-copy-target=\"code-block-0\">Copy</button>\
             <pre><code id=\"code-block-0\" class=\"language-rust\">fn main() {}</code></pre></div>\n"
        );
    }

    #[test]
    fn test_writer_code_block_no_lang() {
        let mut writer = HtmlWriter::new();
        writer.code_block_start(7, "", "Copy");
        writer.code_block_end();
        assert_eq!(
            writer.as_str(),
            "<div class=\"code-block\">\
             <button type=\"button\" class=\"copy-button\" data-copy-target=\"code-block-7\">Copy</button>\
             <pre><code id=\"code-block-7\"></code></pre></div>\n"
        );
    }

    #[test]
    fn test_writer_collapsible() {
        let mut writer = HtmlWriter::new();
        writer.collapsible_start(3, "More <info>");
        writer.collapsible_end();
        assert_eq!(
            writer.as_str(),
            "<div class=\"collapsible\" id=\"collapsible-3\">\
             <button type=\"button\" class=\"collapsible-toggle\" aria-expanded=\"true\" data-toggle-target=\"collapsible-3-content\">More &lt;info&gt;</button>\
             <div class=\"collapsible-content\" id=\"collapsible-3-content\">\n</div></div>\n"
        );
    }

    #[test]
    fn test_writer_thematic_break() {
        let mut writer = HtmlWriter::new();
        writer.thematic_break();
        assert_eq!(writer.as_str(), "<hr />\n");
    }

    #[test]
    fn test_writer_link() {
        let mut writer = HtmlWriter::new();
        writer.link_start("/docs", false);
        writer.write_escaped_text("docs");
        writer.link_end();
        assert_eq!(writer.as_str(), "<a href=\"/docs\">docs</a>");
    }

    #[test]
    fn test_writer_link_new_tab() {
        let mut writer = HtmlWriter::new();
        writer.link_start("https://example.com", true);
        writer.link_end();
        assert_eq!(
            writer.as_str(),
            "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\"></a>"
        );
    }

    #[test]
    fn test_writer_link_escape_url() {
        let mut writer = HtmlWriter::new();
        writer.link_start("/a\"onmouseover=\"x", false);
        writer.link_end();
        assert_eq!(writer.as_str(), "<a href=\"/a&quot;onmouseover=&quot;x\"></a>");
    }

    #[test]
    fn test_writer_image() {
        let mut writer = HtmlWriter::new();
        writer.image("cat.png", "A \"cat\"");
        assert_eq!(
            writer.as_str(),
            "<img src=\"cat.png\" alt=\"A &quot;cat&quot;\" class=\"expandable-image\" />"
        );
    }

    #[test]
    fn test_writer_clear_reuse() {
        let mut writer = HtmlWriter::new();
        writer.paragraph_start();
        writer.clear();
        assert!(writer.is_empty());
        writer.thematic_break();
        assert_eq!(writer.len(), "<hr />\n".len());
    }

    #[test]
    fn test_writer_ol_with_start() {
        let mut writer = HtmlWriter::new();
        writer.ol_start(5);
        assert_eq!(writer.as_str(), "<ol start=\"5\">\n");
    }

    #[test]
    fn test_writer_ol_default_start() {
        let mut writer = HtmlWriter::new();
        writer.ol_start(1);
        assert_eq!(writer.as_str(), "<ol>\n");
    }

    #[test]
    fn test_write_integers() {
        let mut writer = HtmlWriter::new();
        writer.write_u64(0);
        writer.write_char(' ');
        writer.write_u32(u32::MAX);
        writer.write_char(' ');
        writer.write_usize(42);
        assert_eq!(writer.as_str(), "0 4294967295 42");
    }
}
