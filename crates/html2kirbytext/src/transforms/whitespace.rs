//! Sanitizing and whitespace stages that run before the markers.

use kirbytext_dom::{Document, Filter, NodeId};

use super::{collapse_first_line_break, trim_leading_text};
use crate::utilities::TEXT_BLOCKS;
use crate::Result;

/// Remove every `<script>` element.
pub fn remove_scripts(document: &mut Document) -> Result<()> {
    remove_elements(document, &["script"])
}

/// Detach every element whose tag is listed in `tags`.
pub fn remove_elements<S: AsRef<str>>(document: &mut Document, tags: &[S]) -> Result<()> {
    let names: Vec<&str> = tags.iter().map(AsRef::as_ref).collect();
    let matches = document.find_all(&Filter::tags(&names));
    log::trace!("removing {} element(s) matching {names:?}", matches.len());
    for id in matches {
        document.detach(id);
    }
    Ok(())
}

/// Strip the leading whitespace of every source line inside the body.
///
/// Lines are those of the body's serialized markup: a tag or comment ends a
/// line start, and a `\n` inside text starts a new one.
pub fn remove_leading_whitespace(document: &mut Document) -> Result<()> {
    let body = document.body();
    let mut at_line_start = true;
    let mut emptied = Vec::new();
    strip_line_indentation(document, body, &mut at_line_start, &mut emptied)?;
    for id in emptied {
        document.detach(id);
    }
    Ok(())
}

fn strip_line_indentation(
    document: &mut Document,
    parent: NodeId,
    at_line_start: &mut bool,
    emptied: &mut Vec<NodeId>,
) -> Result<()> {
    for child in document.children(parent).to_vec() {
        if document.data(child).is_container() {
            *at_line_start = false;
            strip_line_indentation(document, child, at_line_start, emptied)?;
            // closing tag
            *at_line_start = false;
            continue;
        }
        let Some(text) = document.text(child) else {
            // comment
            *at_line_start = false;
            continue;
        };
        let stripped = strip_indentation(text, at_line_start);
        if stripped.is_empty() {
            emptied.push(child);
        }
        document.set_text(child, stripped)?;
    }
    Ok(())
}

fn strip_indentation(text: &str, at_line_start: &mut bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\n' {
            out.push(c);
            *at_line_start = true;
        } else if *at_line_start && c.is_ascii_whitespace() {
            continue;
        } else {
            out.push(c);
            *at_line_start = false;
        }
    }
    out
}

/// Put the content of every heading, paragraph, list item and blockquote on
/// one line: leading whitespace is stripped, then the first run of line
/// breaks becomes a space.
pub fn normalize_whitespace(document: &mut Document) -> Result<()> {
    for id in document.find_all(&Filter::tags(TEXT_BLOCKS)) {
        trim_leading_text(document, id)?;
        collapse_first_line_break(document, id)?;
    }
    Ok(())
}
