use crate::config::NavConfig;
use html::collect::normalized_text;
use html::query::{elements_by_tag, find_by_id};
use html::Page;

/// `"<first h1 of the main content> - <root>"`, or just the root when the page
/// has no usable heading.
pub fn document_title(page: &Page, config: &NavConfig) -> String {
    let name = find_by_id(page, &config.content_root_id)
        .and_then(|root| elements_by_tag(page, root, "h1").into_iter().next())
        .map(|h1| normalized_text(page, h1))
        .unwrap_or_default();
    if name.is_empty() {
        config.title_root.clone()
    } else {
        format!("{name} - {}", config.title_root)
    }
}

/// Compute the title and write it into the page's `<title>`, if it has one.
pub fn apply_title(page: &mut Page, config: &NavConfig) -> String {
    let title = document_title(page, config);
    if let Some(element) = elements_by_tag(page, page.document(), "title").into_iter().next() {
        page.set_text_content(element, &title);
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::parse_page;

    #[test]
    fn title_uses_first_main_heading() {
        let mut page = parse_page(
            r#"<html><head><title>old</title></head><body>
               <h1>Outside</h1>
               <div id="main-content"><h1> Panel </h1><h1>Second</h1></div>
               </body></html>"#,
        );
        let title = apply_title(&mut page, &NavConfig::default());
        assert_eq!(title, "Panel - Add-on SDK Documentation");
        let element = elements_by_tag(&page, page.document(), "title")[0];
        assert_eq!(normalized_text(&page, element), title);
    }

    #[test]
    fn title_falls_back_to_root() {
        let page = parse_page(r#"<div id="main-content"><p>No heading</p></div>"#);
        assert_eq!(document_title(&page, &NavConfig::default()), "Add-on SDK Documentation");
    }
}
