use crate::config::NavConfig;
use html::query::elements_by_tag;
use html::Page;

/// Prepare `<pre><code>` blocks for the syntax highlighter: the `<pre>` gets the
/// brush class and the inner `<code>` wrapper is replaced by its contents.
///
/// Returns the number of unwrapped `<code>` elements.
pub fn prepare_code_blocks(page: &mut Page, config: &NavConfig) -> usize {
    let blocks: Vec<_> = elements_by_tag(page, page.document(), "code")
        .into_iter()
        .filter_map(|code| {
            let parent = page.parent(code)?;
            page.is_element_named(parent, "pre").then_some((parent, code))
        })
        .collect();

    let mut unwrapped = 0;
    for (pre, code) in blocks {
        page.add_class(pre, &config.code_brush_class);
        if page.unwrap_node(code) {
            unwrapped += 1;
        }
    }
    unwrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::serialize::to_html;
    use html::parse_page;

    #[test]
    fn code_inside_pre_is_unwrapped() {
        let mut page = parse_page(
            "<pre><code>var a = 1;</code></pre><p>inline <code>b()</code></p>",
        );
        assert_eq!(prepare_code_blocks(&mut page, &NavConfig::default()), 1);
        assert_eq!(
            to_html(&page),
            r#"<pre class="brush: js">var a = 1;</pre><p>inline <code>b()</code></p>"#
        );
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let mut page = parse_page("<pre><code>x</code></pre>");
        let config = NavConfig::default();
        prepare_code_blocks(&mut page, &config);
        let once = to_html(&page);
        assert_eq!(prepare_code_blocks(&mut page, &config), 0);
        assert_eq!(to_html(&page), once);
    }
}
