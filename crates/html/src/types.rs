use std::sync::Arc;

/// Stable handle of a node inside a [`crate::Page`] arena.
///
/// Handles are never reused: detaching a node keeps its slot alive so that
/// handles held by callers stay valid for the lifetime of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document node is always the first slot of the arena.
    pub const DOCUMENT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document {
        doctype: Option<String>,
    },
    Element {
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
        /// Inline style declarations; the `style` attribute is folded in here.
        style: Vec<(String, String)>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl NodeKind {
    pub fn element(name: &str) -> Self {
        NodeKind::Element {
            name: Arc::from(name.to_ascii_lowercase()),
            attributes: Vec::new(),
            style: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        NodeKind::Text { text: text.into() }
    }

    pub(crate) fn allows_children(&self) -> bool {
        matches!(self, NodeKind::Document { .. } | NodeKind::Element { .. })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}
