//! Syntax highlighting for fenced code blocks.
//!
//! Works on code that is already HTML-escaped and only wraps substrings in
//! `<span class="hl-…">` elements; the visible text never changes.
//!
//! Each language's rules are compiled into one alternation, ordered
//! comment → string → entity → keyword → literal → number. Regex matching
//! is leftmost-first, so at any position the earliest rule wins and a later
//! rule can never match inside text an earlier one already claimed. The
//! entity rule passes `&lt;`, `&#39;` and friends through untouched so no
//! other rule can split them.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashMap;

/// Lexical category of a highlighted token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    String,
    Keyword,
    /// Booleans, null-likes and similar named constants.
    Literal,
    Number,
}

impl TokenKind {
    /// CSS class for the wrapping span.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Comment => "hl-comment",
            Self::String => "hl-string",
            Self::Keyword => "hl-keyword",
            Self::Literal => "hl-literal",
            Self::Number => "hl-number",
        }
    }
}

/// Languages with a dedicated rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    Rust,
    Python,
    Shell,
    Json,
    Css,
    Html,
    /// Generic rules for unknown or missing tags.
    Plain,
}

const ALIASES: &[(&str, Language)] = &[
    ("js", Language::JavaScript),
    ("javascript", Language::JavaScript),
    ("jsx", Language::JavaScript),
    ("ts", Language::JavaScript),
    ("typescript", Language::JavaScript),
    ("tsx", Language::JavaScript),
    ("rs", Language::Rust),
    ("rust", Language::Rust),
    ("py", Language::Python),
    ("python", Language::Python),
    ("sh", Language::Shell),
    ("bash", Language::Shell),
    ("shell", Language::Shell),
    ("zsh", Language::Shell),
    ("json", Language::Json),
    ("css", Language::Css),
    ("html", Language::Html),
    ("xml", Language::Html),
    ("svg", Language::Html),
];

impl Language {
    /// Resolve a fence info string. Only the first word counts and case is
    /// ignored; anything unknown maps to [`Language::Plain`].
    pub fn from_tag(tag: &str) -> Self {
        let word = tag.split_whitespace().next().unwrap_or("");
        ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(word))
            .map_or(Language::Plain, |&(_, language)| language)
    }
}

/// Highlight escaped code for the language named by `language`.
///
/// # Example
/// ```
/// use foldmark::highlight::highlight;
///
/// let html = highlight("let x = 42;", "rust");
/// assert_eq!(
///     html,
///     "<span class=\"hl-keyword\">let</span> x = <span class=\"hl-number\">42</span>;"
/// );
/// ```
pub fn highlight(escaped_code: &str, language: &str) -> String {
    let resolved = Language::from_tag(language);
    if resolved == Language::Plain {
        trace!("no dedicated rules for {language:?}, using default rule set");
    }
    match RULESETS.get(&resolved) {
        Some(ruleset) => ruleset.apply(escaped_code),
        None => escaped_code.to_owned(),
    }
}

/// A compiled rule set: one regex whose capture group `i + 1` belongs to
/// `kinds[i]`. `None` marks a pass-through rule.
struct Ruleset {
    regex: Regex,
    kinds: Vec<Option<TokenKind>>,
}

impl Ruleset {
    fn compile(rules: &[(Option<TokenKind>, String)]) -> Result<Self, regex::Error> {
        let pattern = rules
            .iter()
            .map(|(_, pattern)| format!("({pattern})"))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            regex: Regex::new(&pattern)?,
            kinds: rules.iter().map(|(kind, _)| *kind).collect(),
        })
    }

    fn apply(&self, code: &str) -> String {
        let mut out = String::with_capacity(code.len() + code.len() / 2);
        let mut last = 0;

        for caps in self.regex.captures_iter(code) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.is_empty() {
                continue;
            }
            let kind = (0..self.kinds.len())
                .find(|&i| caps.get(i + 1).is_some())
                .and_then(|i| self.kinds[i]);

            out.push_str(&code[last..whole.start()]);
            match kind {
                Some(kind) => {
                    out.push_str("<span class=\"");
                    out.push_str(kind.css_class());
                    out.push_str("\">");
                    out.push_str(whole.as_str());
                    out.push_str("</span>");
                }
                None => out.push_str(whole.as_str()),
            }
            last = whole.end();
        }
        out.push_str(&code[last..]);
        out
    }
}

static RULESETS: LazyLock<FxHashMap<Language, Ruleset>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    for language in [
        Language::JavaScript,
        Language::Rust,
        Language::Python,
        Language::Shell,
        Language::Json,
        Language::Css,
        Language::Html,
        Language::Plain,
    ] {
        match Ruleset::compile(&rules_for(language)) {
            Ok(ruleset) => {
                map.insert(language, ruleset);
            }
            Err(_err) => {
                trace!("highlight rules for {:?} failed to compile: {}", language, _err);
            }
        }
    }
    map
});

// Patterns below match escaped text: `"` is `&quot;`, `'` is `&#39;`,
// `<` is `&lt;` and `>` is `&gt;`.

const DQ_STRING: &str = r"&quot;(?:\\.|[^\\\n])*?&quot;";
const SQ_STRING: &str = r"&#39;(?:\\.|[^\\\n])*?&#39;";
const LINE_COMMENT: &str = r"//.*";
const BLOCK_COMMENT: &str = r"(?s:/\*.*?\*/)";
const ENTITY: &str = r"&(?:[a-zA-Z]+|#[0-9]+|#[xX][0-9a-fA-F]+);";
const NUMBER: &str = r"\b(?:0[xX][0-9a-fA-F_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?)\b";

fn words(list: &[&str]) -> String {
    format!(r"\b(?:{})\b", list.join("|"))
}

fn rules_for(language: Language) -> Vec<(Option<TokenKind>, String)> {
    let mut rules: Vec<(Option<TokenKind>, String)> = Vec::new();
    let mut push = |kind: Option<TokenKind>, pattern: &str| rules.push((kind, pattern.to_owned()));

    match language {
        Language::JavaScript => {
            push(Some(TokenKind::Comment), LINE_COMMENT);
            push(Some(TokenKind::Comment), BLOCK_COMMENT);
            push(Some(TokenKind::String), DQ_STRING);
            push(Some(TokenKind::String), SQ_STRING);
            push(Some(TokenKind::String), r"(?s:`(?:\\.|[^\\`])*`)");
            push(None, ENTITY);
            push(
                Some(TokenKind::Keyword),
                &words(&[
                    "async", "await", "break", "case", "catch", "class", "const", "continue",
                    "debugger", "default", "delete", "do", "else", "enum", "export", "extends",
                    "finally", "for", "from", "function", "if", "implements", "import", "in",
                    "instanceof", "interface", "let", "new", "of", "return", "static", "super",
                    "switch", "this", "throw", "try", "type", "typeof", "var", "void", "while",
                    "with", "yield",
                ]),
            );
            push(
                Some(TokenKind::Literal),
                &words(&["true", "false", "null", "undefined", "NaN", "Infinity"]),
            );
            push(Some(TokenKind::Number), NUMBER);
        }
        Language::Rust => {
            push(Some(TokenKind::Comment), LINE_COMMENT);
            push(Some(TokenKind::Comment), BLOCK_COMMENT);
            push(Some(TokenKind::String), DQ_STRING);
            push(Some(TokenKind::String), r"&#39;(?:\\[^\n]{1,10}?|[^\\\n&]|&[a-z]+;)&#39;");
            push(None, ENTITY);
            push(
                Some(TokenKind::Keyword),
                &words(&[
                    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else",
                    "enum", "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match",
                    "mod", "move", "mut", "pub", "ref", "return", "self", "Self", "static",
                    "struct", "super", "trait", "type", "unsafe", "use", "where", "while",
                ]),
            );
            push(Some(TokenKind::Literal), &words(&["true", "false", "None", "Some", "Ok", "Err"]));
            push(
                Some(TokenKind::Number),
                r"\b\d[\d_]*(?:\.\d+)?(?:[iu](?:8|16|32|64|128|size)|f32|f64)?\b",
            );
        }
        Language::Python => {
            push(Some(TokenKind::Comment), r"#.*");
            push(Some(TokenKind::String), r"(?s:&quot;&quot;&quot;.*?&quot;&quot;&quot;)");
            push(Some(TokenKind::String), r"(?s:&#39;&#39;&#39;.*?&#39;&#39;&#39;)");
            push(Some(TokenKind::String), DQ_STRING);
            push(Some(TokenKind::String), SQ_STRING);
            push(None, ENTITY);
            push(
                Some(TokenKind::Keyword),
                &words(&[
                    "and", "as", "assert", "async", "await", "break", "case", "class",
                    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from",
                    "global", "if", "import", "in", "is", "lambda", "match", "nonlocal", "not",
                    "or", "pass", "raise", "return", "try", "while", "with", "yield",
                ]),
            );
            push(Some(TokenKind::Literal), &words(&["True", "False", "None"]));
            push(Some(TokenKind::Number), NUMBER);
        }
        Language::Shell => {
            push(Some(TokenKind::Comment), r"(?m:(?:^|[ \t])#.*)");
            push(Some(TokenKind::String), DQ_STRING);
            push(Some(TokenKind::String), r"&#39;[^\n]*?&#39;");
            push(None, ENTITY);
            push(
                Some(TokenKind::Keyword),
                &words(&[
                    "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done",
                    "case", "esac", "function", "in", "select", "return", "local", "export",
                    "readonly", "declare", "unset", "shift", "exit", "break", "continue",
                ]),
            );
            push(Some(TokenKind::Literal), &words(&["true", "false"]));
            push(Some(TokenKind::Number), r"\b\d+\b");
        }
        Language::Json => {
            push(Some(TokenKind::String), DQ_STRING);
            push(None, ENTITY);
            push(Some(TokenKind::Literal), &words(&["true", "false", "null"]));
            push(Some(TokenKind::Number), r"-?\b\d+(?:\.\d+)?(?:[eE][+-]?\d+)?\b");
        }
        Language::Css => {
            push(Some(TokenKind::Comment), BLOCK_COMMENT);
            push(Some(TokenKind::String), DQ_STRING);
            push(Some(TokenKind::String), SQ_STRING);
            push(None, ENTITY);
            push(Some(TokenKind::Keyword), r"@[a-zA-Z-]+|!important\b");
            push(Some(TokenKind::Literal), r"#[0-9a-fA-F]{3,8}\b");
            push(
                Some(TokenKind::Number),
                r"\b\d+(?:\.\d+)?(?:px|em|rem|vh|vw|ms|s|deg|fr)?\b|\b\d+(?:\.\d+)?%",
            );
        }
        Language::Html => {
            push(Some(TokenKind::Comment), r"(?s:&lt;!--.*?--&gt;)");
            push(Some(TokenKind::String), DQ_STRING);
            push(Some(TokenKind::String), SQ_STRING);
            push(Some(TokenKind::Keyword), r"&lt;/?[A-Za-z][A-Za-z0-9:-]*|&lt;![A-Za-z]+");
            push(None, ENTITY);
        }
        Language::Plain => {
            push(Some(TokenKind::Comment), LINE_COMMENT);
            push(Some(TokenKind::Comment), BLOCK_COMMENT);
            push(Some(TokenKind::String), DQ_STRING);
            push(Some(TokenKind::String), SQ_STRING);
            push(None, ENTITY);
            push(
                Some(TokenKind::Keyword),
                &words(&[
                    "if", "else", "for", "while", "do", "return", "function", "fn", "def",
                    "class", "struct", "let", "const", "var", "import", "from", "switch", "case",
                    "break", "continue", "new", "try", "catch",
                ]),
            );
            push(Some(TokenKind::Literal), &words(&["true", "false", "null", "nil", "None"]));
            push(Some(TokenKind::Number), NUMBER);
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::escape_html;

    fn hl(code: &str, language: &str) -> String {
        highlight(&escape_html(code), language)
    }

    /// Remove all highlight spans, leaving the escaped text.
    fn strip_spans(html: &str) -> String {
        let re = Regex::new(r#"<span class="hl-[a-z]+">|</span>"#).unwrap();
        re.replace_all(html, "").into_owned()
    }

    #[test]
    fn test_language_aliases() {
        assert_eq!(Language::from_tag("js"), Language::JavaScript);
        assert_eq!(Language::from_tag("TypeScript"), Language::JavaScript);
        assert_eq!(Language::from_tag("rust ignore"), Language::Rust);
        assert_eq!(Language::from_tag("Python"), Language::Python);
        assert_eq!(Language::from_tag(""), Language::Plain);
        assert_eq!(Language::from_tag("brainfuck"), Language::Plain);
    }

    #[test]
    fn test_all_rulesets_compile() {
        for language in [
            Language::JavaScript,
            Language::Rust,
            Language::Python,
            Language::Shell,
            Language::Json,
            Language::Css,
            Language::Html,
            Language::Plain,
        ] {
            assert!(RULESETS.contains_key(&language), "{language:?} failed to compile");
        }
    }

    #[test]
    fn test_js_keyword_and_number() {
        assert_eq!(
            hl("const x = 1;", "js"),
            "<span class=\"hl-keyword\">const</span> x = <span class=\"hl-number\">1</span>;"
        );
    }

    #[test]
    fn test_keyword_inside_string_not_highlighted() {
        let html = hl("let s = \"if else\";", "rust");
        assert!(html.contains("<span class=\"hl-string\">&quot;if else&quot;</span>"), "{html}");
        assert!(!html.contains("<span class=\"hl-keyword\">if</span>"), "{html}");
    }

    #[test]
    fn test_keyword_inside_comment_not_highlighted() {
        let html = hl("// return 42\nreturn 1", "js");
        assert!(html.starts_with("<span class=\"hl-comment\">// return 42</span>\n"), "{html}");
        assert!(html.contains("<span class=\"hl-keyword\">return</span> <span class=\"hl-number\">1</span>"));
    }

    #[test]
    fn test_python_comment_and_strings() {
        let html = hl("x = 'a' # note", "python");
        assert!(html.contains("<span class=\"hl-string\">&#39;a&#39;</span>"), "{html}");
        assert!(html.contains("<span class=\"hl-comment\"># note</span>"), "{html}");
    }

    #[test]
    fn test_entity_never_split() {
        // The `39` inside `&#39;` must not be read as a number.
        let html = hl("it's 3", "python");
        assert_eq!(html, "it&#39;s <span class=\"hl-number\">3</span>");
    }

    #[test]
    fn test_html_tags() {
        let html = hl("<div class=\"a\"><!-- c --></div>", "html");
        assert!(html.contains("<span class=\"hl-keyword\">&lt;div</span>"), "{html}");
        assert!(html.contains("<span class=\"hl-string\">&quot;a&quot;</span>"), "{html}");
        assert!(html.contains("<span class=\"hl-comment\">&lt;!-- c --&gt;</span>"), "{html}");
    }

    #[test]
    fn test_json_literals() {
        let html = hl("{\"ok\": true, \"n\": -1.5}", "json");
        assert!(html.contains("<span class=\"hl-literal\">true</span>"), "{html}");
        assert!(html.contains("<span class=\"hl-string\">&quot;ok&quot;</span>"), "{html}");
    }

    #[test]
    fn test_unknown_language_uses_default() {
        let html = hl("return true // done", "cobol");
        assert!(html.contains("<span class=\"hl-keyword\">return</span>"), "{html}");
        assert!(html.contains("<span class=\"hl-comment\">// done</span>"), "{html}");
    }

    #[test]
    fn test_text_content_preserved() {
        let samples = [
            ("fn main() { println!(\"<hi> & 'bye'\"); } // end", "rust"),
            ("const s = `multi\nline`; /* c\n */ x = 0x1F;", "js"),
            ("def f():\n    '''doc'''\n    return None  # x", "py"),
            ("echo \"$HOME\" # comment\nexit 1", "bash"),
            ("a { color: #fff; width: 10px; } /* x */", "css"),
            ("<p title='x'>&amp;</p>", "html"),
            ("plain text with 'quotes' and <angles>", ""),
        ];
        for (code, language) in samples {
            let escaped = escape_html(code);
            assert_eq!(strip_spans(&highlight(&escaped, language)), escaped, "{language}: {code}");
        }
    }
}
