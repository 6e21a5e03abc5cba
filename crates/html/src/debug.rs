use crate::page::Page;
use crate::types::{NodeId, NodeKind};
use std::fmt::Write;

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

pub fn first_styles(style: &[(String, String)]) -> String {
    let mut out = String::new();
    for (i, (k, v)) in style.iter().take(3).enumerate() {
        if i != 0 {
            out.push(' ');
        }
        let _ = write!(&mut out, "{k}: {v};");
    }
    out
}

fn push_preview(out: &mut String, s: &str) {
    for (i, ch) in s.chars().enumerate() {
        if i == PREVIEW_CHARS {
            out.push('…');
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
}

fn node_line(page: &Page, id: NodeId, depth: usize) -> Option<String> {
    let mut line = INDENT_STEP.repeat(depth);
    match page.kind(id)? {
        NodeKind::Document { doctype } => match doctype {
            Some(dt) => {
                let _ = write!(&mut line, "<!{dt}>");
            }
            None => line.push_str("#document"),
        },
        NodeKind::Element { name, style, .. } => {
            let _ = write!(&mut line, "<{name}");
            if let Some(v) = page.attr(id, "id").filter(|v| !v.is_empty()) {
                let _ = write!(&mut line, r#" id="{v}""#);
            }
            if let Some(v) = page.attr(id, "class").filter(|v| !v.is_empty()) {
                let _ = write!(&mut line, r#" class="{v}""#);
            }
            line.push('>');
            let styl = first_styles(style);
            if !styl.is_empty() {
                let _ = write!(&mut line, "  /* {styl} */");
            }
        }
        NodeKind::Text { text } => {
            let t = text.trim();
            if t.is_empty() {
                return None;
            }
            line.push('"');
            push_preview(&mut line, t);
            line.push('"');
        }
        NodeKind::Comment { text } => {
            line.push_str("<!-- ");
            push_preview(&mut line, text);
            line.push_str(" -->");
        }
    }
    Some(line)
}

/// One line per node, indented by depth, capped at `cap` nodes.
///
/// Elements show their `id` and `class`, plus the first few inline styles so that
/// hidden sections and annotated anchors are visible at a glance.
pub fn outline(page: &Page, cap: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![(page.document(), 0usize)];
    let mut left = cap;
    while left > 0
        && let Some((id, depth)) = stack.pop()
    {
        left -= 1;
        if let Some(line) = node_line(page, id, depth) {
            out.push(line);
        }
        for child in page.children(id).iter().rev() {
            stack.push((*child, depth + 1));
        }
    }
    out
}
