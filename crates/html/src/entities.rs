/// Named entities the page tokenizer understands. Documentation pages rarely need more.
const NAMED: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&apos;", '\''),
    ("&nbsp;", '\u{00A0}'),
    ("&mdash;", '\u{2014}'),
    ("&ndash;", '\u{2013}'),
    ("&hellip;", '\u{2026}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode the small entity subset in `NAMED` plus well-formed, semicolon-terminated
/// numeric references. Anything else passes through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return s.to_string();
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut copy_start = 0;
    let mut i = 0;

    while let Some(rel) = memchr::memchr(b'&', &bytes[i..]) {
        i += rel;
        out.push_str(&s[copy_start..i]);

        let (decoded, consumed) = match decode_one(&s[i..]) {
            Some(hit) => hit,
            None => ('&', 1),
        };
        out.push(decoded);
        i += consumed;
        copy_start = i;
        if i >= bytes.len() {
            break;
        }
    }
    out.push_str(&s[copy_start..]);
    out
}

/// Decode a single reference at the start of `rest` (which begins with `&`).
fn decode_one(rest: &str) -> Option<(char, usize)> {
    for (name, ch) in NAMED {
        if rest.starts_with(name) {
            return Some((*ch, name.len()));
        }
    }

    let body = rest.strip_prefix("&#")?;
    let (digits, radix, prefix_len, max) = match body.as_bytes().first() {
        Some(b'x' | b'X') => (&body[1..], 16, 3, MAX_HEX_DIGITS),
        _ => (body, 10, 2, MAX_DEC_DIGITS),
    };
    let end = digits.find(';')?;
    if end == 0 || end > max {
        return None;
    }
    let digits = &digits[..end];
    if !digits.bytes().all(|b| (b as char).is_digit(radix)) {
        return None;
    }
    let ch = u32::from_str_radix(digits, radix).ok().and_then(char::from_u32)?;
    Some((ch, prefix_len + end + 1))
}

pub(crate) fn escape_text(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

pub(crate) fn escape_attr(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_utf8_text_is_untouched() {
        assert_eq!(decode_entities("120×32"), "120×32");
        assert_eq!(decode_entities("π & σ"), "π & σ");
    }

    #[test]
    fn decodes_named_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("name&nbsp;:&nbsp;type"), "name\u{00A0}:\u{00A0}type");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(decode_entities("&#215;"), "×");
        assert_eq!(decode_entities("&#xD7;"), "×");
        assert_eq!(decode_entities("&#x10FFFF;"), "\u{10FFFF}");
    }

    #[test]
    fn malformed_references_pass_through() {
        assert_eq!(decode_entities("&notanentity;"), "&notanentity;");
        assert_eq!(decode_entities("&amp"), "&amp");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#11141111;"), "&#11141111;");
        assert_eq!(decode_entities("&#;"), "&#;");
        assert_eq!(decode_entities("&#xZZ;&amp;"), "&#xZZ;&");
    }

    #[test]
    fn escaping_round_trips_through_decoding() {
        let mut text = String::new();
        escape_text("a < b & c", &mut text);
        assert_eq!(decode_entities(&text), "a < b & c");

        let mut attr = String::new();
        escape_attr(r#"say "hi""#, &mut attr);
        assert_eq!(attr, "say &quot;hi&quot;");
    }
}
