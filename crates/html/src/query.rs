//! Tree-walk queries over a [`Page`].
//!
//! All walks are pre-order, so "first" and "last" refer to document order.
//! Only attached nodes are reachable from the document.

use crate::page::Page;
use crate::types::NodeId;

/// Pre-order iterator over the strict descendants of a node.
pub struct Descendants<'a> {
    page: &'a Page,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.page.children(id).iter().rev().copied());
        Some(id)
    }
}

pub fn descendants(page: &Page, root: NodeId) -> Descendants<'_> {
    Descendants {
        page,
        stack: page.children(root).iter().rev().copied().collect(),
    }
}

pub fn descendant_elements(page: &Page, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    descendants(page, root).filter(|id| page.is_element(*id))
}

/// The first element in document order whose `id` attribute equals `value`.
pub fn find_by_id(page: &Page, value: &str) -> Option<NodeId> {
    descendant_elements(page, page.document()).find(|id| page.attr(*id, "id") == Some(value))
}

pub fn elements_by_tag(page: &Page, root: NodeId, tag: &str) -> Vec<NodeId> {
    descendant_elements(page, root)
        .filter(|id| page.is_element_named(*id, tag))
        .collect()
}

pub fn elements_by_class(page: &Page, root: NodeId, class: &str) -> Vec<NodeId> {
    descendant_elements(page, root)
        .filter(|id| page.has_class(*id, class))
        .collect()
}

/// The last descendant of `root` in document order satisfying `pred`.
pub fn last_matching<F>(page: &Page, root: NodeId, mut pred: F) -> Option<NodeId>
where
    F: FnMut(&Page, NodeId) -> bool,
{
    descendants(page, root).filter(|id| pred(page, *id)).last()
}

pub fn first_matching<F>(page: &Page, root: NodeId, mut pred: F) -> Option<NodeId>
where
    F: FnMut(&Page, NodeId) -> bool,
{
    descendants(page, root).find(|id| pred(page, *id))
}

/// The nearest strict ancestor of `id` satisfying `pred`.
pub fn closest_ancestor<F>(page: &Page, id: NodeId, mut pred: F) -> Option<NodeId>
where
    F: FnMut(&Page, NodeId) -> bool,
{
    let mut cur = page.parent(id);
    while let Some(p) = cur {
        if pred(page, p) {
            return Some(p);
        }
        cur = page.parent(p);
    }
    None
}

/// `id` followed by its ancestors up to the document.
pub fn ancestors_inclusive(page: &Page, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(Some(id), move |cur| page.parent(*cur))
}
