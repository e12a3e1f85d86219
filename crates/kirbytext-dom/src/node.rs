//! Node identity and payload types for the arena DOM.
//!
//! Nodes live in a flat arena owned by [`Document`](crate::Document) and are
//! addressed by [`NodeId`]. Parent links are plain ids, so the tree never
//! holds owning back-references.

use std::fmt;

use indexmap::IndexMap;

/// Handle to a node inside a [`Document`](crate::Document).
///
/// Ids stay valid for the lifetime of the document, including after the
/// node has been detached from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
}

/// Attribute map of an element. Names are stored lowercase.
pub type Attributes = IndexMap<String, String>;

/// Payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// The document root
    Document,
    /// An element with a lowercase tag name
    Element { name: String, attrs: Attributes },
    /// A text node
    Text(String),
    /// A comment; ignored by `text_content`
    Comment(String),
}

impl NodeData {
    /// Create an element payload, normalizing tag and attribute names
    pub fn element(name: &str, attrs: &[(&str, &str)]) -> Self {
        NodeData::Element {
            name: name.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), (*v).to_string()))
                .collect(),
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            NodeData::Document => NodeType::Document,
            NodeData::Element { .. } => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
        }
    }

    /// Whether this node may own children
    pub fn is_container(&self) -> bool {
        matches!(self, NodeData::Document | NodeData::Element { .. })
    }

    /// Lowercase tag name for elements
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            NodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// An arena slot: payload plus tree links.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }
}
