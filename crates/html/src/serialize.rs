use crate::entities::{escape_attr, escape_text};
use crate::page::Page;
use crate::tokenizer::is_void_element;
use crate::types::{NodeId, NodeKind};

enum Step {
    Open(NodeId),
    /// Text inside `<script>`/`<style>`, written unescaped.
    Raw(NodeId),
    Close(NodeId),
}

/// Serialize the attached document back to HTML.
///
/// Inline style declarations are written as a `style` attribute after the other
/// attributes, in declaration order. The walk keeps its own stack, so nesting
/// depth is bounded by memory only.
pub fn to_html(page: &Page) -> String {
    let mut out = String::new();
    if let Some(dt) = page.doctype() {
        out.push_str("<!");
        out.push_str(dt);
        out.push('>');
    }

    let mut stack: Vec<Step> = Vec::new();
    push_children(page, page.document(), false, &mut stack);
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => open_node(page, id, &mut stack, &mut out),
            Step::Raw(id) => {
                if let Some(NodeKind::Text { text }) = page.kind(id) {
                    out.push_str(text);
                }
            }
            Step::Close(id) => {
                if let Some(name) = page.element_name(id) {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
            }
        }
    }
    out
}

fn push_children(page: &Page, id: NodeId, rawtext: bool, stack: &mut Vec<Step>) {
    for child in page.children(id).iter().rev() {
        let raw = rawtext && matches!(page.kind(*child), Some(NodeKind::Text { .. }));
        stack.push(if raw { Step::Raw(*child) } else { Step::Open(*child) });
    }
}

fn open_node(page: &Page, id: NodeId, stack: &mut Vec<Step>, out: &mut String) {
    match page.kind(id) {
        Some(NodeKind::Element {
            name,
            attributes,
            style,
        }) => {
            out.push('<');
            out.push_str(name);
            for (k, v) in attributes {
                out.push(' ');
                out.push_str(k);
                if let Some(v) = v {
                    out.push_str("=\"");
                    escape_attr(v, out);
                    out.push('"');
                }
            }
            if !style.is_empty() {
                let joined = style
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join("; ");
                out.push_str(" style=\"");
                escape_attr(&joined, out);
                out.push('"');
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            stack.push(Step::Close(id));
            let rawtext = &**name == "script" || &**name == "style";
            push_children(page, id, rawtext, stack);
        }
        Some(NodeKind::Text { text }) => escape_text(text, out),
        Some(NodeKind::Comment { text }) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Some(NodeKind::Document { .. }) => push_children(page, id, false, stack),
        None => {}
    }
}
