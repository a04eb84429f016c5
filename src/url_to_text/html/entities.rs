use html_escape::decode_html_entities;

/// Decode HTML entities in structured-data text.
///
/// Covers named entities (`&amp;`, `&nbsp;`, `&mdash;`, `&frac12;`, ...) and
/// the decimal and hex numeric forms. Feeds are often double-encoded
/// (`&amp;amp;`), so decoding runs twice. Non-breaking spaces become plain
/// spaces.
pub fn decode_entities(text: &str) -> String {
    decode_html_entities(&decode_html_entities(text))
        .replace('\u{a0}', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_entities() {
        assert_eq!(decode_entities("Mac &amp; Cheese"), "Mac & Cheese");
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_entities("&quot;best&quot;"), "\"best\"");
        assert_eq!(decode_entities("a&nbsp;b"), "a b");
        assert_eq!(decode_entities("quick &mdash; easy"), "quick — easy");
        assert_eq!(decode_entities("10&ndash;12"), "10–12");
        assert_eq!(decode_entities("350&deg;F"), "350°F");
        assert_eq!(decode_entities("&frac12; &frac14; &frac34;"), "½ ¼ ¾");
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(decode_entities("Mom&#039;s"), "Mom's");
        assert_eq!(decode_entities("Mom&#x27;s"), "Mom's");
        assert_eq!(decode_entities("&#8217;"), "\u{2019}");
        assert_eq!(decode_entities("&#xBD;"), "½");
    }

    #[test]
    fn test_double_encoded() {
        assert_eq!(decode_entities("Salt &amp;amp; Pepper"), "Salt & Pepper");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(decode_entities("2 cups flour"), "2 cups flour");
    }
}
