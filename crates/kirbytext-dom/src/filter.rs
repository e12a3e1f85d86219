//! Typed element filters.
//!
//! A [`Filter`] covers the small set of selector shapes the converter needs
//! (`h1, h2`, `a[href^="mailto"]`, `iframe[src*="vimeo"]`, `pre > code`)
//! without a selector language.

use std::fmt;

use crate::document::Document;
use crate::node::NodeId;

/// Type alias for predicate functions
pub type PredicateFn = Box<dyn Fn(&Document, NodeId) -> bool + Send + Sync>;

/// A filter determines which elements a query returns
pub enum Filter {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match a tag whose attribute value starts with a prefix
    AttrPrefix {
        tag: String,
        attr: String,
        prefix: String,
    },
    /// Match a tag whose attribute value contains a substring
    AttrContains {
        tag: String,
        attr: String,
        needle: String,
    },
    /// Match `child` elements whose parent matches `parent`
    ChildOf {
        parent: Box<Filter>,
        child: Box<Filter>,
    },
    /// Match using a predicate function
    Predicate(PredicateFn),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_ascii_lowercase())
    }

    /// Create a filter for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_ascii_lowercase()).collect())
    }

    /// `tag[attr^="prefix"]`
    pub fn attr_prefix(tag: &str, attr: &str, prefix: &str) -> Self {
        Filter::AttrPrefix {
            tag: tag.to_ascii_lowercase(),
            attr: attr.to_ascii_lowercase(),
            prefix: prefix.to_string(),
        }
    }

    /// `tag[attr*="needle"]`
    pub fn attr_contains(tag: &str, attr: &str, needle: &str) -> Self {
        Filter::AttrContains {
            tag: tag.to_ascii_lowercase(),
            attr: attr.to_ascii_lowercase(),
            needle: needle.to_string(),
        }
    }

    /// `parent > child`
    pub fn child_of(parent: Filter, child: Filter) -> Self {
        Filter::ChildOf {
            parent: Box::new(parent),
            child: Box::new(child),
        }
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Document, NodeId) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches a node
    pub fn matches(&self, document: &Document, id: NodeId) -> bool {
        let Some(tag) = document.tag_name(id) else {
            return false;
        };
        match self {
            Filter::TagName(t) => tag == t,
            Filter::TagNames(tags) => tags.iter().any(|t| t == tag),
            Filter::AttrPrefix { tag: t, attr, prefix } => {
                tag == t
                    && document
                        .attr(id, attr)
                        .is_some_and(|value| value.starts_with(prefix.as_str()))
            }
            Filter::AttrContains { tag: t, attr, needle } => {
                tag == t
                    && document
                        .attr(id, attr)
                        .is_some_and(|value| value.contains(needle.as_str()))
            }
            Filter::ChildOf { parent, child } => {
                child.matches(document, id)
                    && document
                        .parent(id)
                        .is_some_and(|p| parent.matches(document, p))
            }
            Filter::Predicate(f) => f(document, id),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::TagName(t) => write!(f, "{t}"),
            Filter::TagNames(tags) => write!(f, "{}", tags.join(", ")),
            Filter::AttrPrefix { tag, attr, prefix } => write!(f, "{tag}[{attr}^={prefix:?}]"),
            Filter::AttrContains { tag, attr, needle } => write!(f, "{tag}[{attr}*={needle:?}]"),
            Filter::ChildOf { parent, child } => write!(f, "{parent:?} > {child:?}"),
            Filter::Predicate(_) => f.write_str("<predicate>"),
        }
    }
}
