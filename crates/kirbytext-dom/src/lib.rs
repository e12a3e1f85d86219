//! # kirbytext-dom
//!
//! A small mutable DOM used by `html2kirbytext`.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. Every rewrite is an explicit splice (replace, insert, detach)
//! rather than a markup round-trip, so transforms stay independent of any
//! particular HTML parser.
//!
//! # Example
//!
//! ```rust
//! use kirbytext_dom::{Document, Filter};
//!
//! let mut doc = Document::with_body();
//! let body = doc.body();
//! let hr = doc.create_element("hr");
//! doc.append_child(body, hr).unwrap();
//!
//! for hr in doc.find_all(&Filter::tag("hr")) {
//!     let ruler = doc.create_text("****");
//!     doc.replace(hr, ruler).unwrap();
//! }
//! assert_eq!(doc.inner_html(body), "****");
//! ```

mod document;
mod filter;
mod node;
mod serialize;

pub use document::Document;
pub use filter::{Filter, PredicateFn};
pub use node::{Attributes, NodeData, NodeId, NodeType};
pub use serialize::{is_void, VOID_ELEMENTS};

/// Error type for tree operations
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("node {0} cannot have children")]
    NotAContainer(NodeId),

    #[error("node {0} is not a text node")]
    NotText(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("node {0} has no parent")]
    Detached(NodeId),

    #[error("inserting {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

pub type Result<T> = std::result::Result<T, DomError>;
