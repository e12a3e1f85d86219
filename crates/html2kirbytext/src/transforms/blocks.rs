//! Block markers: headings, rulers, quotes, code fences and lists.

use kirbytext_dom::{Document, Filter};

use super::{prepend_marker, replace_with_text, trim_leading_text};
use crate::utilities::HEADINGS;
use crate::Result;

/// Prefix every heading with `#` repeated to its level.
pub fn mark_headlines(document: &mut Document) -> Result<()> {
    for headline in document.find_all(&Filter::tags(HEADINGS)) {
        let level: usize = document
            .tag_name(headline)
            .and_then(|tag| tag[1..].parse().ok())
            .unwrap_or(1);
        document.prepend_text(headline, &format!("{} ", "#".repeat(level)))?;
    }
    Ok(())
}

/// Replace every `<hr>` with `****`.
pub fn mark_ruler(document: &mut Document) -> Result<()> {
    for hr in document.elements_by_tag("hr") {
        if document.is_attached(hr) {
            replace_with_text(document, hr, "****")?;
        }
    }
    Ok(())
}

/// Prefix every blockquote with `> `.
pub fn mark_quotes(document: &mut Document) -> Result<()> {
    for quote in document.elements_by_tag("blockquote") {
        prepend_marker(document, quote, "> ")?;
    }
    Ok(())
}

/// Fence every `pre > code` block.
///
/// The `pre` keeps only the fence lines and the code's own children, so the
/// `code` element disappears and inline code marking skips it.
pub fn mark_code_blocks(document: &mut Document) -> Result<()> {
    let filter = Filter::child_of(Filter::tag("pre"), Filter::tag("code"));
    for code in document.find_all(&filter) {
        let Some(pre) = document.parent(code) else {
            // a sibling code element already fenced this pre
            continue;
        };
        trim_leading_text(document, code)?;

        let mut content = Vec::with_capacity(document.children(code).len() + 2);
        content.push(document.create_text("```\n"));
        content.extend_from_slice(document.children(code));
        content.push(document.create_text("\n```"));
        document.replace_children(pre, content)?;
    }
    Ok(())
}

/// List flavour handled by [`mark_lists`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `<ul>`, items prefixed with `- `
    Unordered,
    /// `<ol>`, items prefixed with `1. `, `2. `, ...
    Ordered,
}

impl ListKind {
    pub fn tag_name(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }

    /// Marker for the item at zero-based `index`
    pub fn prefix(self, index: usize) -> String {
        match self {
            ListKind::Unordered => "- ".to_string(),
            ListKind::Ordered => format!("{}. ", index + 1),
        }
    }
}

/// Prefix each direct child of every list of `kind` with its marker.
pub fn mark_lists(document: &mut Document, kind: ListKind) -> Result<()> {
    for list in document.elements_by_tag(kind.tag_name()) {
        let items: Vec<_> = document.element_children(list).collect();
        for (index, item) in items.into_iter().enumerate() {
            trim_leading_text(document, item)?;
            prepend_marker(document, item, &kind.prefix(index))?;
        }
    }
    Ok(())
}
