//! Selector side of the annotator: which elements may receive a new annotation.
//!
//! A candidate is a paragraph-like element with non-empty text and an ancestor
//! carrying an `id`. Elements already claimed by the resolver (marker class) are
//! skipped, so one paragraph is never offered twice.

use crate::config::ResolverConfig;
use core_types::Annotation;
use html::collect::normalized_text;
use html::query::{closest_ancestor, descendant_elements};
use html::{NodeId, Page};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorCandidate {
    pub node: NodeId,
    pub ancestor_id: String,
    pub anchor_text: String,
}

impl AnchorCandidate {
    pub fn into_annotation(self, url: &str, annotation_text: &str) -> Annotation {
        Annotation {
            url: url.to_string(),
            ancestor_id: self.ancestor_id,
            anchor_text: self.anchor_text,
            annotation_text: annotation_text.to_string(),
        }
    }
}

/// Candidate for a single element, or `None` if it is not eligible.
pub fn candidate_for(page: &Page, node: NodeId, config: &ResolverConfig) -> Option<AnchorCandidate> {
    let tag = page.element_name(node)?;
    if !config.is_paragraph_like(tag) || page.has_class(node, &config.marker_class) {
        return None;
    }
    let anchor_text = normalized_text(page, node);
    if anchor_text.is_empty() {
        return None;
    }
    let ancestor = closest_ancestor(page, node, |page, id| {
        page.attr(id, "id").is_some_and(|v| !v.is_empty())
    })?;
    Some(AnchorCandidate {
        node,
        ancestor_id: page.attr(ancestor, "id")?.to_string(),
        anchor_text,
    })
}

/// Every eligible element of the page, in document order.
pub fn anchor_candidates(page: &Page, config: &ResolverConfig) -> Vec<AnchorCandidate> {
    descendant_elements(page, page.document())
        .filter_map(|id| candidate_for(page, id, config))
        .collect()
}
