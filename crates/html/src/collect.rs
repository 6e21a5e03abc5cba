use crate::page::Page;
use crate::query::descendants;
use crate::types::{NodeId, NodeKind};

#[inline]
fn is_ascii_ws(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\t' | b'\r' | b'\x0c')
}

fn in_rawtext(page: &Page, text_node: NodeId, root: NodeId) -> bool {
    let mut cur = page.parent(text_node);
    while let Some(p) = cur {
        if page.is_element_named(p, "script") || page.is_element_named(p, "style") {
            return true;
        }
        if p == root {
            break;
        }
        cur = page.parent(p);
    }
    false
}

/// Concatenated text of every descendant text node, untouched (DOM `textContent`).
pub fn text_content(page: &Page, id: NodeId) -> String {
    let mut out = String::new();
    if let Some(NodeKind::Text { text }) = page.kind(id) {
        out.push_str(text);
        return out;
    }
    for node in descendants(page, id) {
        if let Some(NodeKind::Text { text }) = page.kind(node) {
            out.push_str(text);
        }
    }
    out
}

/// Collapse every run of ASCII whitespace to a single space and trim both ends.
pub fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.chars() {
        if ch.is_ascii() && is_ascii_ws(ch as u8) {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

/// Rendered text of a subtree: `<script>`/`<style>` bodies are skipped and
/// whitespace is normalized with [`normalize_whitespace`].
pub fn normalized_text(page: &Page, id: NodeId) -> String {
    let mut raw = String::new();
    for node in descendants(page, id) {
        if let Some(NodeKind::Text { text }) = page.kind(node)
            && !in_rawtext(page, node, id)
        {
            raw.push_str(text);
        }
    }
    normalize_whitespace(&raw)
}
