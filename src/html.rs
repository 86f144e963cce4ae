//! HTML text helpers for scraped pages and rendered output.

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"))
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(?:#[xX]([0-9a-fA-F]{1,8})|#([0-9]{1,10})|[A-Za-z][A-Za-z0-9]{1,31});")
            .expect("static regex")
    })
}

/// NUL, surrogates and out-of-range code points decode to U+FFFD.
fn numeric_reference(code: Option<u32>) -> char {
    match code {
        Some(0) | None => char::REPLACEMENT_CHARACTER,
        Some(code) => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}

/// Decodes character references against the full HTML5 entity table.
/// Unknown named references are kept verbatim.
pub fn unescape(input: &str) -> String {
    reference_re()
        .replace_all(input, |caps: &Captures<'_>| {
            if let Some(hex) = caps.get(1) {
                numeric_reference(u32::from_str_radix(hex.as_str(), 16).ok()).to_string()
            } else if let Some(dec) = caps.get(2) {
                numeric_reference(dec.as_str().parse().ok()).to_string()
            } else {
                html_escape::decode_html_entities(&caps[0]).into_owned()
            }
        })
        .into_owned()
}

/// Escapes text for use in element content or a double-quoted attribute.
pub fn escape(input: &str) -> String {
    html_escape::encode_double_quoted_attribute(input).into_owned()
}

/// Drops markup, decodes entities and collapses whitespace.
pub fn text_content(fragment: &str) -> String {
    let stripped = tag_re().replace_all(fragment, "");
    unescape(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_named_and_numeric() {
        assert_eq!(unescape("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(unescape("&quot;hi&quot; &#39;x&#39; &#x41;"), "\"hi\" 'x' A");
        assert_eq!(unescape("&unknownthing; & done"), "&unknownthing; & done");
        assert_eq!(unescape("AT&T"), "AT&T");
    }

    #[test]
    fn unescape_covers_html5_entities() {
        assert_eq!(
            unescape("Caf&eacute; closes &euro;5 &#0;"),
            "Café closes €5 \u{fffd}"
        );
        assert_eq!(unescape("&#xD800; &#99999999;"), "\u{fffd} \u{fffd}");
    }

    #[test]
    fn unescape_is_single_pass() {
        assert_eq!(unescape("&#38;amp;"), "&amp;");
    }

    #[test]
    fn escape_roundtrips_through_unescape() {
        let raw = r#"<script>alert("x") & 'y'</script>"#;
        let escaped = escape(raw);
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('"'));
        assert_eq!(unescape(&escaped), raw);
    }

    #[test]
    fn text_content_strips_tags() {
        assert_eq!(
            text_content("Breaking: <b>Moon</b>\n  made of &lt;cheese&gt;"),
            "Breaking: Moon made of <cheese>"
        );
    }
}
