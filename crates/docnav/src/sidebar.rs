//! Current-page and current-section highlighting for the documentation sidebar.

use crate::config::NavConfig;
use html::query::{closest_ancestor, descendant_elements, elements_by_class, find_by_id};
use html::{NodeId, Page};
use url::Url;

/// Only used to resolve relative locations; never surfaces in output.
const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
    pub relative_path: String,
    /// The `<a>` whose `href` matched the relative path.
    pub current_link: Option<NodeId>,
    /// The link's parent, marked as the current page.
    pub current_entry: Option<NodeId>,
    pub current_section: Option<NodeId>,
}

/// Path component of a location, absolute or page-relative.
pub fn location_path(location: &str) -> String {
    let parsed = Url::parse(location)
        .or_else(|_| Url::parse(PLACEHOLDER_ORIGIN).and_then(|base| base.join(location)));
    match parsed {
        Ok(url) => url.path().to_string(),
        Err(_) => {
            let end = location.find(['?', '#']).unwrap_or(location.len());
            location[..end].to_string()
        }
    }
}

/// Location relative to the documentation root.
///
/// For a root `base_url` this is the location's path. Otherwise the first
/// `base_url.len()` bytes of `location` are dropped without checking that they
/// actually are `base_url`.
pub fn relative_path(location: &str, base_url: &str) -> String {
    if base_url == "/" {
        return location_path(location);
    }
    if !location.starts_with(base_url) {
        log::debug!(
            target: "docnav.sidebar",
            "base url {base_url:?} is not a prefix of {location:?}; slicing anyway"
        );
    }
    location.get(base_url.len()..).unwrap_or_default().to_string()
}

fn clear_marks(page: &mut Page, class: &str) {
    for id in elements_by_class(page, page.document(), class) {
        page.remove_class(id, class);
    }
}

fn find_link(page: &Page, href: &str) -> Option<NodeId> {
    descendant_elements(page, page.document())
        .find(|id| page.is_element_named(*id, "a") && page.attr(*id, "href") == Some(href))
}

fn owning_section(page: &Page, entry: NodeId, config: &NavConfig) -> Option<NodeId> {
    let section = if page.has_class(entry, &config.section_header_class) {
        page.next_element_sibling(entry)
    } else {
        closest_ancestor(page, entry, |page, id| {
            page.has_class(id, &config.section_contents_class)
        })
    };
    section.filter(|s| page.is_attached(*s))
}

/// Mark the nav entry and sidebar section for `location`, collapsing every other
/// section that is not flagged always-show.
pub fn highlight_current(
    page: &mut Page,
    location: &str,
    base_url: &str,
    config: &NavConfig,
) -> Highlight {
    clear_marks(page, &config.current_page_class);
    clear_marks(page, &config.current_section_class);

    let relative_path = relative_path(location, base_url);
    let current_link = find_link(page, &relative_path);
    let current_entry = current_link.and_then(|link| page.parent(link));
    if let Some(entry) = current_entry {
        page.add_class(entry, &config.current_page_class);
    } else {
        log::debug!(target: "docnav.sidebar", "no nav link for {relative_path:?}");
    }

    let current_section = current_entry
        .and_then(|entry| owning_section(page, entry, config))
        .or_else(|| find_by_id(page, &config.default_section_id));

    for section in elements_by_class(page, page.document(), &config.section_contents_class) {
        if Some(section) != current_section && !page.has_class(section, &config.always_show_class)
        {
            page.hide(section);
        }
    }

    match current_section {
        Some(section) => {
            if let Some(parent) = page.parent(section) {
                page.add_class(parent, &config.current_section_class);
            }
            page.show(section);
        }
        None => log::debug!(target: "docnav.sidebar", "no current section and no default section"),
    }

    Highlight {
        relative_path,
        current_link,
        current_entry,
        current_section,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_base_uses_path_component() {
        assert_eq!(
            relative_path("http://localhost:8888/dev-guide/welcome?x=1#top", "/"),
            "/dev-guide/welcome"
        );
        assert_eq!(relative_path("/guide/welcome#frag", "/"), "/guide/welcome");
    }

    #[test]
    fn non_root_base_is_a_plain_prefix_slice() {
        assert_eq!(relative_path("/docs/guide/welcome", "/docs/"), "guide/welcome");
        assert_eq!(
            relative_path("https://example.org/sdk/docs/api/panel", "https://example.org/sdk/docs/"),
            "api/panel"
        );
    }

    #[test]
    fn prefix_mismatch_slices_without_panicking() {
        assert_eq!(relative_path("/other/guide", "/docs/"), "/guide");
        assert_eq!(relative_path("/d", "/docs/"), "");
        // Byte length lands inside a multi-byte character.
        assert_eq!(relative_path("/é", "/x"), "");
    }
}
