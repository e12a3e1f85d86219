//! Utility functions and constants for text processing.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+").expect("valid regex"));
static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid regex"));

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Elements whose whitespace is collapsed onto a single line
pub const TEXT_BLOCKS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "blockquote"];

/// Heading elements
pub const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Strip leading whitespace, line breaks included
pub fn trim_left(s: &str) -> String {
    LEADING_WHITESPACE.replace(s, "").into_owned()
}

/// Replace the first run of line breaks with a single space
pub fn remove_line_breaks(s: &str) -> String {
    LINE_BREAKS.replace(s, " ").into_owned()
}

/// `trim_left(remove_line_breaks(s))`
pub fn trimmed_oneliner(s: &str) -> String {
    trim_left(&remove_line_breaks(s))
}

/// Collapse consecutive blank lines into one and drop leading blank lines.
///
/// Lines holding only spaces are not blank.
pub fn collapse_empty_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if line.is_empty() && lines.last().map_or(true, |last| last.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// A present, non-empty attribute value
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_left() {
        assert_eq!(trim_left("   foo"), "foo");
        assert_eq!(trim_left("foo"), "foo");
        assert_eq!(trim_left(&trim_left("\t foo ")), "foo ");
    }

    #[test]
    fn test_remove_line_breaks() {
        assert_eq!(remove_line_breaks("\n\nfoo"), " foo");
        assert_eq!(remove_line_breaks("a\nb\n\nc"), "a b\n\nc");
        assert_eq!(remove_line_breaks("flat"), "flat");
    }

    #[test]
    fn test_trimmed_oneliner() {
        assert_eq!(trimmed_oneliner("\n\n\n    foo"), "foo");
        for s in ["  a\nb\nc", "\n\n  a\nb", "a\n\n  b", "", "\n"] {
            assert_eq!(trimmed_oneliner(s), trim_left(&remove_line_breaks(s)));
        }
        assert_eq!(trimmed_oneliner("\n\n  a\nb"), "a\nb");
    }

    #[test]
    fn test_collapse_empty_lines() {
        let text = "lorem\n\n\nipsum\n\n\n\n\ndolor.";
        assert_eq!(collapse_empty_lines(text), "lorem\n\nipsum\n\ndolor.");
    }

    #[test]
    fn test_collapse_empty_lines_edges() {
        assert_eq!(collapse_empty_lines("\n\nfirst"), "first");
        assert_eq!(collapse_empty_lines("last\n\n\n"), "last\n");
        assert_eq!(collapse_empty_lines("a\n  \n  \nb"), "a\n  \n  \nb");
        assert_eq!(collapse_empty_lines(""), "");
    }

    #[test]
    fn test_is_block() {
        assert!(is_block("div"));
        assert!(is_block("P"));
        assert!(!is_block("span"));
        assert!(!is_block("a"));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("500")), Some("500"));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
    }
}
