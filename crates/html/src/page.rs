//! Mutable page tree.
//!
//! Contract:
//! - Nodes live in an append-only arena and are addressed by [`NodeId`].
//! - Children are ordered; document order is a pre-order walk from
//!   [`NodeId::DOCUMENT`].
//! - A node has at most one parent. Detached nodes keep their slot but are not
//!   reachable from the document (see [`Page::is_attached`]).
//! - Element and attribute names are canonical ASCII-lowercase.
//! - Class membership is the whitespace-separated token list of `class`.
//! - Visibility is modeled as the inline declaration `display: none`.

use crate::types::{NodeId, NodeKind, NodeRecord};
use std::sync::Arc;

const DISPLAY: &str = "display";
const DISPLAY_NONE: &str = "none";

#[derive(Debug, Clone)]
pub struct Page {
    nodes: Vec<NodeRecord>,
}

impl Page {
    pub fn new() -> Self {
        Self::with_doctype(None)
    }

    pub fn with_doctype(doctype: Option<String>) -> Self {
        Self {
            nodes: vec![NodeRecord {
                kind: NodeKind::Document { doctype },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn document(&self) -> NodeId {
        NodeId::DOCUMENT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1 && self.nodes[0].children.is_empty()
    }

    fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(id.index())
    }

    fn record_mut(&mut self, id: NodeId) -> Option<&mut NodeRecord> {
        self.nodes.get_mut(id.index())
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.record(id).map(|r| &r.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.record(id).and_then(|r| r.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.record(id).map_or(&[], |r| r.children.as_slice())
    }

    /// Create a detached node. Attach it with [`Page::append_child`].
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// Returns `false` (and leaves the tree untouched) if `parent` cannot hold
    /// children, `child` already has a parent, or the append would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(parent_record) = self.record(parent) else {
            return false;
        };
        if !parent_record.kind.allows_children() || parent == child {
            return false;
        }
        match self.record(child) {
            Some(r) if r.parent.is_none() => {}
            _ => return false,
        }
        if self.is_ancestor(child, parent) {
            return false;
        }
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
        true
    }

    /// Create a node and append it under `parent` in one step.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.create(kind);
        self.append_child(parent, id);
        id
    }

    /// Replace `id` with its own children, in place. The node itself is detached.
    pub fn unwrap_node(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        let children = match self.record_mut(id) {
            Some(r) => std::mem::take(&mut r.children),
            None => return false,
        };
        for child in &children {
            self.nodes[child.index()].parent = Some(parent);
        }
        let siblings = &mut self.nodes[parent.index()].children;
        let Some(pos) = siblings.iter().position(|s| *s == id) else {
            return false;
        };
        siblings.splice(pos..=pos, children);
        self.nodes[id.index()].parent = None;
        true
    }

    /// Detach every child of `id`. Returns how many were removed.
    pub fn clear_children(&mut self, id: NodeId) -> usize {
        let children = match self.record_mut(id) {
            Some(r) => std::mem::take(&mut r.children),
            None => return 0,
        };
        for child in &children {
            self.nodes[child.index()].parent = None;
        }
        children.len()
    }

    /// True if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// True if `id` is reachable from the document node.
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == NodeId::DOCUMENT || self.is_ancestor(NodeId::DOCUMENT, id)
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|s| *s == id)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|s| self.is_element(*s))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Element { .. }))
    }

    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element_named(&self, id: NodeId, target: &str) -> bool {
        self.element_name(id)
            .is_some_and(|name| name.eq_ignore_ascii_case(target))
    }

    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    pub fn set_attr(&mut self, id: NodeId, key: &str, value: &str) {
        let Some(NodeKind::Element { attributes, .. }) = self.record_mut(id).map(|r| &mut r.kind)
        else {
            return;
        };
        match attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some((_, v)) => *v = Some(value.to_string()),
            None => attributes.push((Arc::from(key.to_ascii_lowercase()), Some(value.to_string()))),
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, key: &str) {
        if let Some(NodeKind::Element { attributes, .. }) = self.record_mut(id).map(|r| &mut r.kind)
        {
            attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|t| t == class))
    }

    /// Add every whitespace-separated token of `class` that is not already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.is_element(id) {
            return;
        }
        let mut tokens: Vec<String> = self
            .attr(id, "class")
            .map(|v| v.split_ascii_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        let mut changed = false;
        for token in class.split_ascii_whitespace() {
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
                changed = true;
            }
        }
        if changed {
            self.set_attr(id, "class", &tokens.join(" "));
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        let Some(current) = self.attr(id, "class") else {
            return;
        };
        let remaining: Vec<&str> = current
            .split_ascii_whitespace()
            .filter(|t| !class.split_ascii_whitespace().any(|c| c == *t))
            .collect();
        let joined = remaining.join(" ");
        if joined.is_empty() {
            self.remove_attr(id, "class");
        } else {
            self.set_attr(id, "class", &joined);
        }
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { style, .. } => style
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(property))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        let Some(NodeKind::Element { style, .. }) = self.record_mut(id).map(|r| &mut r.kind) else {
            return;
        };
        match style
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
        {
            Some((_, v)) => *v = value.to_string(),
            None => style.push((property.to_ascii_lowercase(), value.to_string())),
        }
    }

    pub fn remove_style(&mut self, id: NodeId, property: &str) {
        if let Some(NodeKind::Element { style, .. }) = self.record_mut(id).map(|r| &mut r.kind) {
            style.retain(|(k, _)| !k.eq_ignore_ascii_case(property));
        }
    }

    pub fn hide(&mut self, id: NodeId) {
        self.set_style(id, DISPLAY, DISPLAY_NONE);
    }

    pub fn show(&mut self, id: NodeId) {
        if self.is_hidden(id) {
            self.remove_style(id, DISPLAY);
        }
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.style(id, DISPLAY)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(DISPLAY_NONE))
    }

    pub fn doctype(&self) -> Option<&str> {
        match &self.nodes[0].kind {
            NodeKind::Document { doctype } => doctype.as_deref(),
            _ => None,
        }
    }

    pub fn set_doctype(&mut self, value: Option<String>) {
        if let NodeKind::Document { doctype } = &mut self.nodes[0].kind {
            *doctype = value;
        }
    }

    /// Extend an existing text node.
    pub fn append_text(&mut self, id: NodeId, more: &str) {
        if let Some(NodeKind::Text { text }) = self.record_mut(id).map(|r| &mut r.kind) {
            text.push_str(more);
        }
    }

    /// Replace all children of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if !self.is_element(id) {
            return;
        }
        let old = std::mem::take(&mut self.nodes[id.index()].children);
        for child in old {
            self.nodes[child.index()].parent = None;
        }
        if !text.is_empty() {
            self.append(id, NodeKind::text(text));
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
