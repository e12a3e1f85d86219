//! HTML parsing support.
//!
//! This module parses HTML strings with scraper/html5ever and copies the
//! result into the [`Document`] arena the transforms operate on.

use kirbytext_dom::{Document, NodeId};
use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::Result;

/// Parse an HTML string into a Document.
///
/// The parser always produces `html`, `head` and `body`, so
/// [`Document::body`] finds the content.
///
/// # Example
///
/// ```rust
/// use html2kirbytext::{parse_html, Html2Kirbytext};
///
/// let document = parse_html("<h1>Hello <em>World</em></h1>").unwrap();
/// let text = Html2Kirbytext::new().convert(document).unwrap();
/// assert_eq!(text, "# Hello _World_");
/// ```
pub fn parse_html(html: &str) -> Result<Document> {
    let parsed = Html::parse_document(html);
    let mut document = Document::new();
    let root = document.root();
    import_element(&mut document, root, parsed.root_element())?;
    Ok(document)
}

/// Replace the children of `id` with the parsed `markup` (the `innerHTML` setter).
pub fn set_inner_html(document: &mut Document, id: NodeId, markup: &str) -> Result<()> {
    let fragment = Html::parse_fragment(markup);
    let holder = document.create_element("template");
    import_children(document, holder, fragment.root_element())?;
    let children = document.children(holder).to_vec();
    document.replace_children(id, children)?;
    Ok(())
}

/// Copy a scraper ElementRef into the arena under `parent`
fn import_element(document: &mut Document, parent: NodeId, element: ElementRef) -> Result<()> {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let id = document.create_element_with_attrs(element.value().name(), &attrs);
    document.append_child(parent, id)?;
    import_children(document, id, element)
}

fn import_children(document: &mut Document, parent: NodeId, element: ElementRef) -> Result<()> {
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                let node = document.create_text(&text.text);
                document.append_child(parent, node)?;
            }
            ScraperNode::Comment(comment) => {
                let node = document.create_comment(&comment.comment);
                document.append_child(parent, node)?;
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    import_element(document, parent, child_element)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}
