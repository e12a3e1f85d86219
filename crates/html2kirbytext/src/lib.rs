//! # html2kirbytext
//!
//! Convert HTML documents to Kirbytext-flavoured Markdown.
//!
//! Headings, emphasis, lists, quotes and code get Markdown markup; images,
//! links and video embeds become inline tags such as
//! `(image: a.jpg alt: t)` or `(mail: x@y.co text: Write me)`.
//!
//! ## Design
//!
//! A conversion is a fixed chain of stages over one mutable
//! [`Document`](kirbytext_dom::Document). Each stage splices text nodes into
//! the tree in place; the last one reads the body text and collapses blank
//! lines. An optional custom transform runs after source indentation is
//! stripped and before any marking happens.
//!
//! ## Example (Document-based)
//!
//! ```rust
//! use html2kirbytext::{convert, Document};
//!
//! let mut doc = Document::with_body();
//! let body = doc.body();
//! let h1 = doc.create_element("h1");
//! let title = doc.create_text("Hello World");
//! doc.append_child(body, h1).unwrap();
//! doc.append_child(h1, title).unwrap();
//!
//! assert_eq!(convert(doc).unwrap(), "# Hello World");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! let text = html2kirbytext::convert_html(r#"<p>Mail <a href="mailto:x@y.co">me</a></p>"#).unwrap();
//! assert_eq!(text, "Mail (mail: x@y.co text: me)");
//! ```

#[cfg(feature = "html")]
pub mod html;
mod pipeline;
mod service;
pub mod transforms;
mod utilities;

#[cfg(feature = "html")]
pub use html::{parse_html, set_inner_html};
pub use kirbytext_dom::{Document, DomError, Filter, NodeId};
pub use pipeline::{Pipeline, TransformFn, CUSTOM_STAGE};
pub use service::{ConvertOptions, Html2Kirbytext};
pub use transforms::{LinkKind, ListKind, TextExtraction, VideoProvider};
pub use utilities::*;

/// Error type for html2kirbytext operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{provider} is not a supported video type. Please use {allowed}.")]
    UnsupportedProvider { provider: String, allowed: String },

    #[error(transparent)]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Convert a document with the default pipeline
pub fn convert(document: Document) -> Result<String> {
    Html2Kirbytext::new().convert(document)
}

/// Convert a document, running `custom` at the custom-transform stage
pub fn convert_with<F>(document: Document, custom: F) -> Result<String>
where
    F: Fn(&mut Document) -> Result<()> + Send + Sync + 'static,
{
    let mut service = Html2Kirbytext::new();
    service.custom_transform(custom);
    service.convert(document)
}

/// Parse an HTML string and convert it with the default pipeline
#[cfg(feature = "html")]
pub fn convert_html(html: &str) -> Result<String> {
    Html2Kirbytext::new().convert_html(html)
}
