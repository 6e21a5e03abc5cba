//! Table of contents generation.
//!
//! Contract:
//! - Headings are processed once, in document order; entries are appended, never
//!   reordered.
//! - The display name is the heading text up to the first type marker (`" : "`).
//! - Identifiers are unique per run. A taken name gets `_<n>` appended, where `n`
//!   comes from a counter that only ever increases within the run.
//! - The heading's `id` attribute is overwritten with the assigned identifier.

use crate::config::NavConfig;
use html::collect::normalized_text;
use html::query::{descendant_elements, find_by_id};
use html::{NodeId, NodeKind, Page};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::HashSet;
use std::sync::Arc;

/// Characters left alone by JavaScript's `encodeURIComponent`.
const FRAGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub display_name: String,
    pub link: String,
    /// Tag name of the originating heading (`h2`..`h6`); used as the entry's class.
    pub tag_level: String,
    pub heading: NodeId,
}

/// Identifier bookkeeping for one page. Start every independent run from
/// [`TocState::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocState {
    assigned: HashSet<String>,
    counter: u32,
}

impl TocState {
    pub fn new() -> Self {
        Self {
            assigned: HashSet::new(),
            counter: 1,
        }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Reserve a unique identifier for `base`.
    pub fn assign(&mut self, base: &str) -> String {
        let mut suffixed = base.to_string();
        while self.assigned.contains(&suffixed) {
            self.counter += 1;
            suffixed = format!("{base}_{}", self.counter);
        }
        self.assigned.insert(suffixed.clone());
        suffixed
    }
}

impl Default for TocState {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading content with the first type marker and everything after it removed.
pub fn display_name<'a>(content: &'a str, type_marker: &str) -> &'a str {
    if type_marker.is_empty() {
        return content;
    }
    content
        .split_once(type_marker)
        .map_or(content, |(base, _)| base)
}

pub fn fragment_link(location: &str, id: &str) -> String {
    let page = location.split_once('#').map_or(location, |(page, _)| page);
    format!("{page}#{}", utf8_percent_encode(id, FRAGMENT))
}

/// Heading elements in document order, under the configured content root.
pub fn collect_headings(page: &Page, config: &NavConfig) -> Vec<NodeId> {
    let root = find_by_id(page, &config.content_root_id).unwrap_or(page.document());
    descendant_elements(page, root)
        .filter(|id| page.element_name(*id).is_some_and(|tag| config.is_heading(tag)))
        .collect()
}

/// Assign identifiers to the page's headings and render the ToC into the container.
///
/// The container's previous contents are replaced. With no headings it is left
/// empty and hidden.
pub fn generate_toc(
    page: &mut Page,
    location: &str,
    config: &NavConfig,
    mut state: TocState,
) -> (Vec<TocEntry>, TocState) {
    let container = find_by_id(page, &config.toc_container_id);
    if let Some(container) = container {
        page.clear_children(container);
    }
    let headings = collect_headings(page, config);

    if headings.is_empty() {
        if let Some(container) = container {
            page.hide(container);
        }
        log::debug!(target: "docnav.toc", "no headings; toc hidden");
        return (Vec::new(), state);
    }

    let mut entries = Vec::with_capacity(headings.len());
    for heading in headings {
        let content = normalized_text(page, heading);
        let base = display_name(&content, &config.type_marker).to_string();
        let id = state.assign(&base);
        page.set_attr(heading, "id", &id);

        let entry = TocEntry {
            link: fragment_link(location, &id),
            tag_level: page.element_name(heading).unwrap_or_default().to_string(),
            display_name: base,
            id,
            heading,
        };
        if let Some(container) = container {
            render_entry(page, container, &entry);
        }
        entries.push(entry);
    }

    if container.is_none() {
        log::debug!(
            target: "docnav.toc",
            "no #{} container; {} entries not rendered",
            config.toc_container_id,
            entries.len()
        );
    }
    (entries, state)
}

fn render_entry(page: &mut Page, container: NodeId, entry: &TocEntry) -> NodeId {
    let anchor = page.append(
        container,
        NodeKind::Element {
            name: Arc::from("a"),
            attributes: vec![
                (Arc::from("href"), Some(entry.link.clone())),
                (Arc::from("class"), Some(entry.tag_level.clone())),
                (Arc::from("title"), Some(entry.display_name.clone())),
            ],
            style: Vec::new(),
        },
    );
    page.append(anchor, NodeKind::text(entry.display_name.as_str()));
    anchor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_first_type_marker_only() {
        assert_eq!(display_name("Alpha : string", " : "), "Alpha");
        assert_eq!(display_name("a : b : c", " : "), "a");
        assert_eq!(display_name("Alpha", " : "), "Alpha");
        assert_eq!(display_name("ratio:number", " : "), "ratio:number");
    }

    #[test]
    fn assign_suffixes_collisions() {
        let mut state = TocState::new();
        let ids: Vec<_> = ["Alpha", "Alpha", "Beta"]
            .iter()
            .map(|n| state.assign(n))
            .collect();
        assert_eq!(ids, vec!["Alpha", "Alpha_2", "Beta"]);
    }

    #[test]
    fn counter_is_shared_across_base_names() {
        let mut state = TocState::new();
        let ids: Vec<_> = ["a", "a", "b", "b", "a"]
            .iter()
            .map(|n| state.assign(n))
            .collect();
        assert_eq!(ids, vec!["a", "a_2", "b", "b_3", "a_4"]);
        assert_eq!(state.counter(), 4);
    }

    #[test]
    fn suffix_skips_names_already_taken_literally() {
        let mut state = TocState::new();
        let ids: Vec<_> = ["x_2", "x", "x"].iter().map(|n| state.assign(n)).collect();
        assert_eq!(ids, vec!["x_2", "x", "x_3"]);
    }

    #[test]
    fn fragment_is_percent_encoded_like_encode_uri_component() {
        assert_eq!(
            fragment_link("/guide/welcome", "on(type, fn) & more"),
            "/guide/welcome#on(type%2C%20fn)%20%26%20more"
        );
        assert_eq!(fragment_link("/page#old", "new"), "/page#new");
        assert_eq!(fragment_link("/p", "café"), "/p#caf%C3%A9");
    }
}
