//! The mutable document tree.
//!
//! [`Document`] owns every node in a flat arena. Structural edits are
//! explicit splices: a replacement takes the exact child index of the node
//! it replaces, and detached nodes stay in the arena but are no longer
//! reachable from the root.

use crate::filter::Filter;
use crate::node::{Node, NodeData, NodeId, NodeType};
use crate::{DomError, Result};

/// A mutable DOM tree with a single document root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// Create a document with an `html`/`head`/`body` skeleton
    pub fn with_body() -> Self {
        let mut document = Self::new();
        let html = document.create_element("html");
        let head = document.create_element("head");
        let body = document.create_element("body");
        // Freshly created nodes cannot form a cycle.
        document.link(document.root(), html);
        document.link(html, head);
        document.link(html, body);
        document
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The first `body` element, or the root when there is none
    pub fn body(&self) -> NodeId {
        self.find_first_in(self.root(), &Filter::tag("body"))
            .unwrap_or_else(|| self.root())
    }

    /// Number of nodes in the arena, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    // ------------------------------------------------------------------
    // Construction

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::element(name, &[]))
    }

    pub fn create_element_with_attrs(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.push(NodeData::element(name, attrs))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node::new(data));
        NodeId(self.nodes.len() - 1)
    }

    // ------------------------------------------------------------------
    // Inspection

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.data(id).node_type()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.node_type(id) == NodeType::Element
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.node_type(id) == NodeType::Text
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.data(id).tag_name()
    }

    pub fn has_tag(&self, id: NodeId, name: &str) -> bool {
        self.tag_name(id)
            .is_some_and(|tag| tag.eq_ignore_ascii_case(name))
    }

    /// Get an attribute value by name
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.data(id) {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        match &mut self.nodes[id.0].data {
            NodeData::Element { attrs, .. } => {
                attrs.insert(name.to_ascii_lowercase(), value.to_string());
                Ok(())
            }
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    /// Value of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) -> Result<()> {
        match &mut self.nodes[id.0].data {
            NodeData::Text(text) => {
                *text = value.into();
                Ok(())
            }
            _ => Err(DomError::NotText(id)),
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Get only element children
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.is_element(child))
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Position of the node in its parent's child list
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// Whether the node is reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root() {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment(_) => {}
            NodeData::Document | NodeData::Element { .. } => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries. Results are snapshots, so callers can mutate while iterating.

    /// All descendants of `id` in document order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Elements under the root matching `filter`
    pub fn find_all(&self, filter: &Filter) -> Vec<NodeId> {
        self.find_all_in(self.root(), filter)
    }

    /// Elements under `scope` matching `filter`
    pub fn find_all_in(&self, scope: NodeId, filter: &Filter) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| filter.matches(self, id))
            .collect()
    }

    pub fn find_first_in(&self, scope: NodeId, filter: &Filter) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&id| filter.matches(self, id))
    }

    pub fn elements_by_tag(&self, name: &str) -> Vec<NodeId> {
        self.find_all(&Filter::tag(name))
    }

    // ------------------------------------------------------------------
    // Mutation

    fn ensure_insertable(&self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.data(parent).is_container() {
            return Err(DomError::NotAContainer(parent));
        }
        if child == self.root() || self.is_ancestor_or_self(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.ensure_insertable(parent, child)?;
        self.detach(child);
        self.link(parent, child);
        Ok(())
    }

    /// Insert `child` at `index` (clamped) in `parent`'s child list
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        self.ensure_insertable(parent, child)?;
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Remove the node from its parent. Detached nodes are left alone.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent.take() else {
            return;
        };
        self.nodes[parent.0].children.retain(|&child| child != id);
    }

    /// Put `new` at the position of `old` and detach `old`
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        if old == new {
            return Ok(());
        }
        let parent = self.parent(old).ok_or(DomError::Detached(old))?;
        self.ensure_insertable(parent, new)?;
        self.detach(new);
        let index = self
            .index_in_parent(old)
            .ok_or(DomError::Detached(old))?;
        self.nodes[parent.0].children[index] = new;
        self.nodes[new.0].parent = Some(parent);
        self.nodes[old.0].parent = None;
        Ok(())
    }

    /// Detach all children of `parent` and adopt `children` in order
    pub fn replace_children(&mut self, parent: NodeId, children: Vec<NodeId>) -> Result<()> {
        if !self.data(parent).is_container() {
            return Err(DomError::NotAContainer(parent));
        }
        for child in self.children(parent).to_vec() {
            self.detach(child);
        }
        for child in children {
            self.append_child(parent, child)?;
        }
        Ok(())
    }

    /// Insert text before the first child, merging into a leading text node
    pub fn prepend_text(&mut self, parent: NodeId, text: &str) -> Result<()> {
        if !self.data(parent).is_container() {
            return Err(DomError::NotAContainer(parent));
        }
        if let Some(first) = self.first_child(parent) {
            if let NodeData::Text(existing) = &mut self.nodes[first.0].data {
                existing.insert_str(0, text);
                return Ok(());
            }
        }
        let node = self.create_text(text);
        self.insert_child(parent, 0, node)
    }

    /// Insert text after the last child, merging into a trailing text node
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<()> {
        if !self.data(parent).is_container() {
            return Err(DomError::NotAContainer(parent));
        }
        if let Some(last) = self.last_child(parent) {
            if let NodeData::Text(existing) = &mut self.nodes[last.0].data {
                existing.push_str(text);
                return Ok(());
            }
        }
        let node = self.create_text(text);
        self.append_child(parent, node)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
