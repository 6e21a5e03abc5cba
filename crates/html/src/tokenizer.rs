//! Tolerant HTML tokenizer for rendered documentation pages.
//!
//! Supported tag/attribute name characters (ASCII only): `[A-Za-z0-9:_-]`.
//! Names are lowercased. `<script>` and `<style>` bodies are emitted as raw text.
//!
//! Known limitations:
//! - Not an HTML5 state machine; there is no parse-error recovery beyond skipping
//!   stray bytes.
//! - Rawtext close-tag scanning accepts only ASCII whitespace before `>`.
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack
        .get(start..start + needle.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(needle))
}

#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Find `</name` followed by optional ASCII whitespace and `>`. Returns the byte
/// range of the close tag relative to `haystack`.
fn find_rawtext_close_tag(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &bytes[i..]) {
        i += rel;
        if bytes.get(i + 1) == Some(&b'/')
            && starts_with_ignore_ascii_case_at(bytes, i + 2, name.as_bytes())
        {
            let mut k = i + 2 + name.len();
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if bytes.get(k) == Some(&b'>') {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// Tokenize a complete page.
pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut i = 0;

    // Slices are only cut at ASCII structural bytes, so endpoints stay on UTF-8 boundaries.
    while i < len {
        if bytes[i] != b'<' {
            let start = i;
            i = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            let decoded = decode_entities(&input[start..i]);
            if !decoded.is_empty() {
                out.push(Token::Text(decoded));
            }
            continue;
        }

        if input[i..].starts_with(COMMENT_START) {
            let body_start = i + COMMENT_START.len();
            match input[body_start..].find(COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                    i = body_start + end + COMMENT_END.len();
                    continue;
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    break;
                }
            }
        }

        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let rest = &input[i + 2..];
            match rest.find('>') {
                Some(end) => {
                    out.push(Token::Doctype(rest[..end].trim().to_string()));
                    i += 2 + end + 1;
                    continue;
                }
                None => break,
            }
        }

        if bytes.get(i + 1) == Some(&b'/') {
            let start = i + 2;
            let mut j = start;
            while j < len && is_name_byte(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            j = memchr(b'>', &bytes[j..]).map_or(len, |rel| j + rel + 1);
            if !name.is_empty() {
                out.push(Token::EndTag(name));
            }
            i = j;
            continue;
        }

        let start = i + 1;
        let mut k = start;
        while k < len && is_name_byte(bytes[k]) {
            k += 1;
        }
        if k == start {
            // A lone '<' is text.
            out.push(Token::Text("<".to_string()));
            i += 1;
            continue;
        }
        let name = input[start..k].to_ascii_lowercase();
        let mut attributes: Vec<(String, Option<String>)> = Vec::new();
        let mut self_closing = false;

        let skip_whitespace = |k: &mut usize| {
            while *k < len && bytes[*k].is_ascii_whitespace() {
                *k += 1;
            }
        };

        loop {
            skip_whitespace(&mut k);
            if k >= len {
                break;
            }
            match bytes[k] {
                b'>' => {
                    k += 1;
                    break;
                }
                b'/' => {
                    if bytes.get(k + 1) == Some(&b'>') {
                        self_closing = true;
                        k += 2;
                        break;
                    }
                    k += 1;
                    continue;
                }
                _ => {}
            }
            let name_start = k;
            while k < len && is_name_byte(bytes[k]) {
                k += 1;
            }
            if name_start == k {
                k += 1;
                continue;
            }
            let attr_name = input[name_start..k].to_ascii_lowercase();

            skip_whitespace(&mut k);
            let value = if bytes.get(k) == Some(&b'=') {
                k += 1;
                skip_whitespace(&mut k);
                match bytes.get(k).copied() {
                    Some(quote) if quote == b'"' || quote == b'\'' => {
                        k += 1;
                        let vstart = k;
                        k = memchr(quote, &bytes[k..]).map_or(len, |rel| k + rel);
                        let raw = &input[vstart..k];
                        if k < len {
                            k += 1;
                        }
                        Some(decode_entities(raw))
                    }
                    _ => {
                        let vstart = k;
                        while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                            k += 1;
                        }
                        Some(decode_entities(&input[vstart..k]))
                    }
                }
            } else {
                None
            };
            attributes.push((attr_name, value));
        }

        if is_void_element(&name) {
            self_closing = true;
        }
        let rawtext = !self_closing && (name == "script" || name == "style");
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });

        if rawtext {
            match find_rawtext_close_tag(&input[k..], &name) {
                Some((rel_start, rel_end)) => {
                    let raw = &input[k..k + rel_start];
                    if !raw.is_empty() {
                        out.push(Token::Text(raw.to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i = k + rel_end;
                }
                None => {
                    // Missing close tag: the remainder is rawtext.
                    let raw = &input[k..];
                    if !raw.is_empty() {
                        out.push(Token::Text(raw.to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i = len;
                }
            }
            continue;
        }

        i = k;
    }

    log::trace!(target: "html.tokenizer", "tokenized {} bytes into {} tokens", len, out.len());
    out
}
