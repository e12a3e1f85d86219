//! Terminal stage: read the body text and tidy blank lines.

use kirbytext_dom::{Document, NodeData, NodeId};

use crate::utilities::{collapse_empty_lines, is_block};

/// How the body text is read before blank lines are collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextExtraction {
    /// Block-level elements start on their own line and `<br>` breaks the line
    #[default]
    Blocks,
    /// Plain `textContent`
    Raw,
}

/// Extract the body text and collapse consecutive blank lines.
pub fn normalize_empty_lines(document: &Document, extraction: TextExtraction) -> String {
    let body = document.body();
    let text = match extraction {
        TextExtraction::Blocks => block_text(document, body),
        TextExtraction::Raw => document.text_content(body),
    };
    collapse_empty_lines(&text)
}

/// `textContent` of `id` with line breaks around block-level elements.
///
/// Breaks are inserted lazily: only before further content, and only when
/// that content does not already start on a new line.
pub fn block_text(document: &Document, id: NodeId) -> String {
    let mut writer = LineWriter::default();
    for &child in document.children(id) {
        writer.walk(document, child);
    }
    writer.out
}

#[derive(Default)]
struct LineWriter {
    out: String,
    pending_break: bool,
}

impl LineWriter {
    fn walk(&mut self, document: &Document, id: NodeId) {
        match document.data(id) {
            NodeData::Text(text) => self.push_str(text),
            NodeData::Comment(_) => {}
            NodeData::Element { name, .. } if name == "br" => self.push_str("\n"),
            NodeData::Element { name, .. } => {
                let block = is_block(name);
                if block {
                    self.break_line();
                }
                for &child in document.children(id) {
                    self.walk(document, child);
                }
                if block {
                    self.break_line();
                }
            }
            NodeData::Document => {
                for &child in document.children(id) {
                    self.walk(document, child);
                }
            }
        }
    }

    fn break_line(&mut self) {
        self.pending_break = true;
    }

    fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.pending_break {
            self.pending_break = false;
            if !text.starts_with('\n') && !self.out.is_empty() && !self.out.ends_with('\n') {
                self.out.push('\n');
            }
        }
        self.out.push_str(text);
    }
}
