//! Heading slugs.
//!
//! A slug is derived from the raw heading text: lowercase it, drop every
//! character outside `[a-z0-9]`, whitespace and `-`, turn each whitespace
//! run into one `-`, then trim `-` from both ends.

use rustc_hash::FxHashMap;

/// Generate the slug for a heading's text.
///
/// Identical texts produce identical slugs; see [`SlugRegistry`] for
/// collision handling.
///
/// # Examples
///
/// ```
/// use foldmark::slug;
///
/// assert_eq!(slug("Hello World"), "hello-world");
/// assert_eq!(slug("Hello, World! (2024)"), "hello-world-2024");
/// assert_eq!(slug("  --Trim me--  "), "trim-me");
/// ```
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_gap = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            pending_gap = true;
            continue;
        }
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            continue;
        }
        if pending_gap {
            out.push('-');
            pending_gap = false;
        }
        out.push(c);
    }

    out.trim_matches('-').to_owned()
}

/// Hands out heading ids for one render, optionally making them unique.
///
/// With `unique` off every heading gets its bare slug, so repeated titles
/// share an id. With it on, the second and later uses of a slug get `-1`,
/// `-2`, ... appended, skipping suffixes that are themselves taken.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    unique: bool,
    seen: FxHashMap<String, usize>,
}

impl SlugRegistry {
    pub fn new(unique: bool) -> Self {
        Self {
            unique,
            seen: FxHashMap::default(),
        }
    }

    /// Id for a heading with the given raw text.
    pub fn id_for(&mut self, text: &str) -> String {
        let mut base = slug(text);
        if base.is_empty() {
            base.push_str("heading");
        }
        if !self.unique {
            return base;
        }

        let Some(count) = self.seen.get(&base).copied() else {
            self.seen.insert(base.clone(), 0);
            return base;
        };
        let mut n = count + 1;
        let mut candidate = format!("{base}-{n}");
        while self.seen.contains_key(&candidate) {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        self.seen.insert(base, n);
        self.seen.insert(candidate.clone(), 0);
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_simple() {
        assert_eq!(slug("Title"), "title");
        assert_eq!(slug("Chapter One"), "chapter-one");
    }

    #[test]
    fn test_slug_strips_punctuation() {
        assert_eq!(slug("What's new?"), "whats-new");
        assert_eq!(slug("C++ & Rust"), "c-rust");
    }

    #[test]
    fn test_slug_collapses_whitespace() {
        assert_eq!(slug("a \t  b\n c"), "a-b-c");
    }

    #[test]
    fn test_slug_keeps_hyphen_runs() {
        // Only whitespace runs collapse; existing hyphens are kept.
        assert_eq!(slug("a - b"), "a---b");
        assert_eq!(slug("foo--bar"), "foo--bar");
    }

    #[test]
    fn test_slug_trims_hyphens() {
        assert_eq!(slug("-- edge --"), "edge");
    }

    #[test]
    fn test_slug_drops_non_ascii() {
        assert_eq!(slug("Héllo Wörld"), "hllo-wrld");
        assert_eq!(slug("日本語"), "");
    }

    #[test]
    fn test_slug_markup_characters() {
        assert_eq!(slug("Hello **World**"), "hello-world");
        assert_eq!(slug("The `code` function"), "the-code-function");
        assert_eq!(slug("foo_bar"), "foobar");
    }

    #[test]
    fn test_registry_shared_ids_by_default() {
        let mut registry = SlugRegistry::new(false);
        assert_eq!(registry.id_for("Intro"), "intro");
        assert_eq!(registry.id_for("Intro"), "intro");
    }

    #[test]
    fn test_registry_unique_suffixes() {
        let mut registry = SlugRegistry::new(true);
        assert_eq!(registry.id_for("Hello"), "hello");
        assert_eq!(registry.id_for("Hello"), "hello-1");
        assert_eq!(registry.id_for("Hello"), "hello-2");
    }

    #[test]
    fn test_registry_skips_taken_suffix() {
        let mut registry = SlugRegistry::new(true);
        assert_eq!(registry.id_for("a-1"), "a-1");
        assert_eq!(registry.id_for("a"), "a");
        assert_eq!(registry.id_for("a"), "a-2");
    }

    #[test]
    fn test_registry_empty_slug_fallback() {
        let mut registry = SlugRegistry::new(false);
        assert_eq!(registry.id_for("!!!"), "heading");
    }
}
