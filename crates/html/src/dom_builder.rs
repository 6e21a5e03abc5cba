use crate::page::Page;
use crate::tokenizer::tokenize;
use crate::types::{NodeId, NodeKind, Token};
use std::sync::Arc;

/// Elements whose start tag implicitly closes an open `<p>`.
fn closes_paragraph(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "ul"
            | "ol"
            | "dl"
            | "pre"
            | "table"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "nav"
            | "blockquote"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
    )
}

/// Elements that bound the search for an open `<p>` (HTML button scope).
fn is_paragraph_scope_boundary(name: &str) -> bool {
    matches!(
        name,
        "applet"
            | "button"
            | "caption"
            | "html"
            | "marquee"
            | "object"
            | "table"
            | "td"
            | "template"
            | "th"
    )
}

/// Stack position of the `<p>` in scope, if any.
fn open_paragraph(page: &Page, open_elements: &[NodeId]) -> Option<usize> {
    for (pos, id) in open_elements.iter().enumerate().rev() {
        match page.element_name(*id) {
            Some("p") => return Some(pos),
            Some(name) if is_paragraph_scope_boundary(name) => return None,
            _ => {}
        }
    }
    None
}

/// Split an inline `style` attribute into `(property, value)` declarations.
pub(crate) fn parse_inline_style(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            let value = value.trim();
            (!prop.is_empty() && !value.is_empty())
                .then(|| (prop.to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}

pub fn parse_page(input: &str) -> Page {
    build_page(tokenize(input))
}

pub fn build_page(tokens: Vec<Token>) -> Page {
    let mut page = Page::new();
    let root = page.document();
    let mut open_elements: Vec<NodeId> = Vec::new();
    let mut doctype: Option<String> = None;

    for token in tokens {
        let parent = open_elements.last().copied().unwrap_or(root);
        match token {
            Token::Doctype(s) => {
                doctype.get_or_insert(s);
            }
            Token::Comment(text) => {
                page.append(parent, NodeKind::Comment { text });
            }
            Token::Text(text) => {
                if text.is_empty() {
                    continue;
                }
                // Adjacent text tokens (e.g. around a stray '<') merge into one node.
                if let Some(&last) = page.children(parent).last()
                    && let Some(NodeKind::Text { .. }) = page.kind(last)
                {
                    page.append_text(last, &text);
                    continue;
                }
                page.append(parent, NodeKind::Text { text });
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                if closes_paragraph(&name)
                    && let Some(pos) = open_paragraph(&page, &open_elements)
                {
                    open_elements.truncate(pos);
                }
                let parent = open_elements.last().copied().unwrap_or(root);

                let mut style = Vec::new();
                let attributes = attributes
                    .into_iter()
                    .filter_map(|(k, v)| {
                        if k == "style" {
                            style = parse_inline_style(v.as_deref().unwrap_or(""));
                            return None;
                        }
                        Some((Arc::<str>::from(k), v))
                    })
                    .collect();
                let id = page.append(
                    parent,
                    NodeKind::Element {
                        name: Arc::from(name),
                        attributes,
                        style,
                    },
                );
                if !self_closing {
                    open_elements.push(id);
                }
            }
            Token::EndTag(name) => {
                // Unmatched end tags are ignored rather than closing everything.
                if let Some(pos) = open_elements
                    .iter()
                    .rposition(|id| page.is_element_named(*id, &name))
                {
                    open_elements.truncate(pos);
                }
            }
        }
    }

    if doctype.is_some() {
        page.set_doctype(doctype);
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_page_stress_deep_nesting() {
        let depth: usize = 10_000;
        let mut tokens = Vec::with_capacity(depth * 2);
        for _ in 0..depth {
            tokens.push(Token::StartTag {
                name: "div".to_string(),
                attributes: Vec::new(),
                self_closing: false,
            });
        }
        for _ in 0..depth {
            tokens.push(Token::EndTag("div".to_string()));
        }

        let page = build_page(tokens);

        let mut current = page.document();
        let mut seen = 0usize;
        while let [only] = page.children(current) {
            assert!(page.is_element_named(*only, "div"));
            seen += 1;
            current = *only;
        }
        assert_eq!(seen, depth);
        assert!(page.children(current).is_empty());
    }

    #[test]
    fn paragraph_is_closed_by_block_start() {
        let page = parse_page("<div><p>one<p>two<ul><li>x</li></ul></div>");
        let div = page.children(page.document())[0];
        let names: Vec<_> = page
            .children(div)
            .iter()
            .filter_map(|c| page.element_name(*c))
            .collect();
        assert_eq!(names, vec!["p", "p", "ul"]);
    }

    #[test]
    fn paragraph_close_stops_at_scope_boundaries() {
        let page = parse_page(
            "<div><p>a<table><tr><td>cell<div>x</div></td></tr></table></div>\
             <p>b<button><div>y</div></button></p>",
        );
        let doc = page.document();
        let outer = page.children(doc)[0];
        let names: Vec<_> = page
            .children(outer)
            .iter()
            .filter_map(|c| page.element_name(*c))
            .collect();
        assert_eq!(names, vec!["p", "table"]);

        let td = crate::query::elements_by_tag(&page, doc, "td")[0];
        let in_cell = crate::query::elements_by_tag(&page, td, "div");
        assert_eq!(in_cell.len(), 1, "div stays inside the cell");

        let button = crate::query::elements_by_tag(&page, doc, "button")[0];
        let p = page.parent(button).unwrap();
        assert!(page.is_element_named(p, "p"));
        assert_eq!(crate::query::elements_by_tag(&page, button, "div").len(), 1);
    }

    #[test]
    fn stray_end_tag_does_not_close_ancestors() {
        let page = parse_page("<div><span>a</b>b</span></div>");
        let div = page.children(page.document())[0];
        let span = page.children(div)[0];
        assert_eq!(page.children(span).len(), 1, "text must stay merged in span");
    }

    #[test]
    fn style_attribute_is_folded_into_declarations() {
        let page = parse_page(r#"<p style="display: none; border:solid 1px red">x</p>"#);
        let p = page.children(page.document())[0];
        assert!(page.is_hidden(p));
        assert_eq!(page.style(p, "border"), Some("solid 1px red"));
        assert_eq!(page.attr(p, "style"), None);
    }

    #[test]
    fn stray_angle_bracket_merges_into_one_text_node() {
        let page = parse_page("<p>a < b</p>");
        let p = page.children(page.document())[0];
        assert_eq!(page.children(p).len(), 1);
    }
}
