//! Text sanitization applied to user-supplied fields before storage.

/// Entities produced by [`escape_html`], in the order they are tried when decoding.
const ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&#34;", '"'),
    ("&#39;", '\''),
];

/// Trim surrounding whitespace and HTML-escape the rest.
///
/// The input is decoded before it is escaped, so cleaning already-clean text
/// returns it unchanged. The cost is that escaped and raw spellings collapse:
/// `Tom & Jerry` and a literal `Tom &amp; Jerry` are both stored as
/// `Tom &amp; Jerry`.
pub fn clean(input: &str) -> String {
    escape_html(&unescape_html(input.trim()))
}

/// Escape the five HTML-special characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode the entities emitted by [`escape_html`]; anything else is kept verbatim.
pub fn unescape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, c)) => {
                out.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&#34;Tom&#34; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_unescape_inverts_escape() {
        let raw = r#"a & b <c> "d" 'e' &amp;"#;
        assert_eq!(unescape_html(&escape_html(raw)), raw);
    }

    #[test]
    fn test_unescape_keeps_unknown_entities() {
        assert_eq!(unescape_html("&nbsp; & &lt"), "&nbsp; & &lt");
    }

    #[test]
    fn test_clean_trims_and_escapes() {
        assert_eq!(clean("  <script>  "), "&lt;script&gt;");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for input in ["  Tom & Jerry ", "<a href='x'>", "plain", "&amp;", "", " \t"] {
            let once = clean(input);
            assert_eq!(clean(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_clean_treats_escaped_and_raw_text_alike() {
        assert_eq!(clean("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(clean("Tom &amp; Jerry"), "Tom &amp; Jerry");
        assert_eq!(clean("&lt;b&gt;"), clean("<b>"));
        // Unknown entities are not decoded, so their ampersand is escaped
        assert_eq!(clean("&nbsp;"), "&amp;nbsp;");
    }
}
