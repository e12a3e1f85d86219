//! Anchor markers: `(link: ...)`, `(tel: ...)` and `(mail: ...)`.

use kirbytext_dom::{Document, Filter, NodeId};

use super::replace_with_text;
use crate::utilities::non_empty;
use crate::Result;

/// Anchor flavours handled by [`mark_links`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `a[href^="mailto"]`
    Mail,
    /// `a[href^="tel"]`
    Tel,
    /// every remaining `a`
    Link,
}

impl LinkKind {
    /// Annotation name
    pub fn name(self) -> &'static str {
        match self {
            LinkKind::Mail => "mail",
            LinkKind::Tel => "tel",
            LinkKind::Link => "link",
        }
    }

    pub fn filter(self) -> Filter {
        match self {
            LinkKind::Mail => Filter::attr_prefix("a", "href", "mailto"),
            LinkKind::Tel => Filter::attr_prefix("a", "href", "tel"),
            LinkKind::Link => Filter::tag("a"),
        }
    }
}

/// Replace every anchor matching `filter` with a `(<name>: ...)` annotation.
pub fn mark_links(document: &mut Document, filter: &Filter, name: &str) -> Result<()> {
    for link in document.find_all(filter) {
        if !document.is_attached(link) {
            continue;
        }
        let annotation = link_annotation(document, link, name);
        replace_with_text(document, link, &annotation)?;
    }
    Ok(())
}

fn link_annotation(document: &Document, link: NodeId, name: &str) -> String {
    let href = document
        .attr(link, "href")
        .unwrap_or_default()
        .replacen("mailto:", "", 1)
        .replacen("tel:", "", 1);
    let text = document.text_content(link);

    let mut result = vec![format!("({name}: {href} text: {}", text.trim())];
    if non_empty(document.attr(link, "target")).is_some_and(opens_popup) {
        result.push("popup: yes".to_string());
    }
    if let Some(title) = non_empty(document.attr(link, "title")) {
        result.push(format!("title: {title}"));
    }
    if let Some(class) = non_empty(document.attr(link, "class")) {
        result.push(format!("class: {class}"));
    }
    format!("{})", result.join(" "))
}

/// Any target except one that starts with `blank`.
///
/// `_blank` and `foo` both open a popup; the literal `blank` does not.
fn opens_popup(target: &str) -> bool {
    target.find("blank") != Some(0)
}
