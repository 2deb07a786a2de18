//! HTML name handling
//!
//! Tag and attribute names are matched ASCII case-insensitively, so every
//! name is folded to lowercase before it is used as a key. This module also
//! recognizes passthrough attributes (`data-*`, `aria-*`), valid custom
//! element names, and splits space-separated token lists.

use once_cell::sync::Lazy;
use regex::Regex;

// Simplified PotentialCustomElementName: lowercase ASCII start, at least one hyphen
static CUSTOM_ELEMENT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9._\u{B7}\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{37D}\u{37F}-\u{1FFF}-]*-[a-z0-9._\u{B7}\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{37D}\u{37F}-\u{1FFF}-]*$")
        .unwrap()
});

/// Names the HTML standard reserves even though they match the custom element grammar
const RESERVED_CUSTOM_ELEMENT_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Fold a tag or attribute name to its canonical (ASCII lowercase) form
pub fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// ASCII whitespace as defined by HTML (space, tab, LF, FF, CR)
pub fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0C}' | '\r')
}

/// Split a space-separated token list on runs of ASCII whitespace
pub fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split(is_html_whitespace).filter(|t| !t.is_empty())
}

/// Check whether an attribute name falls in a passthrough namespace
///
/// The name must be longer than the prefix: a bare `data-` is not a custom
/// data attribute.
pub fn is_passthrough<S: AsRef<str>>(name: &str, prefixes: &[S]) -> bool {
    let name = normalize_name(name);
    prefixes.iter().any(|prefix| {
        let prefix = prefix.as_ref();
        name.len() > prefix.len() && name.starts_with(&prefix.to_ascii_lowercase())
    })
}

/// Check whether a tag is a valid custom element name (e.g. `foo-bar`)
pub fn is_valid_custom_element_name(tag: &str) -> bool {
    CUSTOM_ELEMENT_NAME.is_match(tag) && !RESERVED_CUSTOM_ELEMENT_NAMES.contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("tabIndex"), "tabindex");
        assert_eq!(normalize_name("  HREF "), "href");
        assert_eq!(normalize_name("data-Foo"), "data-foo");
    }

    #[test]
    fn test_split_tokens() {
        let tokens: Vec<_> = split_tokens("  stylesheet\t\nnofollow   stylesheet ").collect();
        assert_eq!(tokens, vec!["stylesheet", "nofollow", "stylesheet"]);

        assert_eq!(split_tokens("").count(), 0);
        assert_eq!(split_tokens(" \t ").count(), 0);
    }

    #[test]
    fn test_split_tokens_ignores_non_html_whitespace() {
        // U+00A0 is not ASCII whitespace and stays inside the token
        let tokens: Vec<_> = split_tokens("a\u{A0}b c").collect();
        assert_eq!(tokens, vec!["a\u{A0}b", "c"]);
    }

    #[test]
    fn test_is_passthrough() {
        let prefixes = ["data-", "aria-"];
        assert!(is_passthrough("data-custom", &prefixes[..]));
        assert!(is_passthrough("ARIA-label", &prefixes[..]));
        assert!(!is_passthrough("data-", &prefixes[..]));
        assert!(!is_passthrough("dataset", &prefixes[..]));
        assert!(!is_passthrough("id", &prefixes[..]));
    }

    #[test]
    fn test_custom_element_names() {
        assert!(is_valid_custom_element_name("foo-bar"));
        assert!(is_valid_custom_element_name("my-element-2"));
        assert!(!is_valid_custom_element_name("foobar"));
        assert!(!is_valid_custom_element_name("Foo-bar"));
        assert!(!is_valid_custom_element_name("-foo"));
        assert!(!is_valid_custom_element_name("font-face"));
    }
}
