//! Document transforms.
//!
//! Each stage mutates the [`Document`] in place and returns `Ok(())`; the
//! terminal stage, [`normalize_empty_lines`], reads the final text. Stages
//! are independent functions so callers can run any subset of them.

mod blocks;
mod embeds;
mod flatten;
mod inline;
mod links;
mod whitespace;

pub use blocks::{mark_code_blocks, mark_headlines, mark_lists, mark_quotes, mark_ruler, ListKind};
pub use embeds::{mark_video_embeds, VideoProvider};
pub use flatten::{block_text, normalize_empty_lines, TextExtraction};
pub use inline::{mark_bold, mark_images, mark_inline_code, mark_italic};
pub use links::{mark_links, LinkKind};
pub use whitespace::{
    normalize_whitespace, remove_elements, remove_leading_whitespace, remove_scripts,
};

use kirbytext_dom::{Document, NodeId};

use crate::utilities::{remove_line_breaks, trim_left};
use crate::Result;

/// Strip leading whitespace from the serialized content of `parent`.
///
/// Only leading text children are touched; an element at the start ends
/// the trim, the same way a tag ends `^\s+` on markup.
pub(crate) fn trim_leading_text(document: &mut Document, parent: NodeId) -> Result<()> {
    while let Some(first) = document.first_child(parent) {
        let trimmed = match document.text(first) {
            Some(text) => trim_left(text),
            None => break,
        };
        if trimmed.is_empty() {
            document.detach(first);
            continue;
        }
        document.set_text(first, trimmed)?;
        break;
    }
    Ok(())
}

/// Collapse the first run of line breaks below `parent` into one space.
pub(crate) fn collapse_first_line_break(document: &mut Document, parent: NodeId) -> Result<()> {
    for id in document.descendants(parent) {
        let collapsed = match document.text(id) {
            Some(text) if text.contains('\n') => remove_line_breaks(text),
            _ => continue,
        };
        document.set_text(id, collapsed)?;
        break;
    }
    Ok(())
}

/// Wrap the content of `parent` between `open` and `close`.
pub(crate) fn wrap_content(
    document: &mut Document,
    parent: NodeId,
    open: &str,
    close: &str,
) -> Result<()> {
    document.prepend_text(parent, open)?;
    document.append_text(parent, close)?;
    Ok(())
}

/// Put a line marker in front of the content of `parent`.
///
/// The marker joins the text reached by following first children, so it
/// stays on the same line as content wrapped in a nested block.
pub(crate) fn prepend_marker(
    document: &mut Document,
    parent: NodeId,
    marker: &str,
) -> Result<()> {
    let mut current = parent;
    while let Some(first) = document.first_child(current) {
        if let Some(text) = document.text(first) {
            let marked = format!("{marker}{text}");
            document.set_text(first, marked)?;
            return Ok(());
        }
        if !document.is_element(first) {
            break;
        }
        current = first;
    }
    document.prepend_text(parent, marker)?;
    Ok(())
}

/// Replace `target` with a text node holding `annotation`.
pub(crate) fn replace_with_text(
    document: &mut Document,
    target: NodeId,
    annotation: &str,
) -> Result<()> {
    log::trace!("replacing {target} with {annotation:?}");
    let node = document.create_text(annotation);
    document.replace(target, node)?;
    Ok(())
}
