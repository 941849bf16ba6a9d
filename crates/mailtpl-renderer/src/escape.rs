//! HTML escaping helpers.
//!
//! Everything a caller hands to the text-based blocks passes through
//! [`escape_html`] before it reaches the HTML output. The `Html` block is the
//! only path that inserts caller markup unchanged.

use std::borrow::Cow;

/// Escape `&`, `<`, `>`, `"` and `'` for use in element content and quoted
/// attribute values.
///
/// ```
/// use mailtpl_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(s)
}

/// Decode HTML entities (named, decimal and hex).
///
/// Inverse of [`escape_html`].
#[must_use]
pub fn unescape_html(s: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(s)
}

/// Escape text and turn line breaks into `<br>` elements.
#[must_use]
pub fn escape_multiline(s: &str) -> String {
    let escaped = escape_html(s);
    if escaped.contains('\n') {
        escaped.replace("\r\n", "\n").replace('\n', "<br>")
    } else {
        escaped.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_html("sample <b>bold</b> text &Uuml;mlaut"),
            "sample &lt;b&gt;bold&lt;/b&gt; text &amp;Uuml;mlaut"
        );
    }

    #[test]
    fn test_escape_quotes() {
        let escaped = escape_html(r#"say "hi" it's"#);
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
        assert!(escaped.contains("&quot;"));
    }

    #[test]
    fn test_escape_plain_text_borrows() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_round_trip() {
        for original in [
            "sample <b>bold</b> text &Uuml;mlaut",
            r#"quotes " and ' mixed"#,
            "already &amp; escaped",
            "Ümlaut & €",
        ] {
            assert_eq!(unescape_html(&escape_html(original)), original);
        }
    }

    #[test]
    fn test_escape_multiline() {
        assert_eq!(escape_multiline("a <b>\nc"), "a &lt;b&gt;<br>c");
        assert_eq!(escape_multiline("one\r\ntwo"), "one<br>two");
        assert_eq!(escape_multiline("single"), "single");
    }
}
