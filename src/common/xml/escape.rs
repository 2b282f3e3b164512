//! XML escaping in attribute and content modes.
//!
//! The two modes must never be confused: attribute values escape all five
//! special characters, while HTML payload embedded as element text escapes
//! only `& < >` so literal quotation marks inside the markup survive the
//! round trip into the LMS editor.

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

// Static initialization: automata are built only once, thread-safe
static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build attribute escaper")
});

// Use LeftmostLongest to ensure longer entities are matched first (e.g., &amp; instead of &lt;)
static ATTR_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build attribute unescaper")
});

static CONTENT_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">"])
        .expect("Failed to build content escaper")
});

static CONTENT_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;"])
        .expect("Failed to build content unescaper")
});

/// Escape a string for use as an XML attribute value.
///
/// # Examples
///
/// ```
/// use imscc::common::xml::escape_attribute;
/// assert_eq!(escape_attribute("a & b"), "a &amp; b");
/// assert_eq!(escape_attribute("say \"hi\""), "say &quot;hi&quot;");
/// ```
#[inline]
pub fn escape_attribute(s: &str) -> String {
    ATTR_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Unescape an XML attribute value.
///
/// Unknown or malformed entities are left unchanged.
///
/// # Examples
///
/// ```
/// use imscc::common::xml::unescape_attribute;
/// assert_eq!(unescape_attribute("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_attribute("&amp;lt;"), "&lt;"); // &amp; is matched first
/// assert_eq!(unescape_attribute("&invalid;"), "&invalid;"); // unknown entity
/// ```
#[inline]
pub fn unescape_attribute(s: &str) -> String {
    ATTR_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'"])
}

/// Escape a string for embedding as XML element text.
///
/// Only `& < >` are converted; quotation marks pass through, so HTML
/// payload like `<p class="x">` keeps its literal quotes.
///
/// # Examples
///
/// ```
/// use imscc::common::xml::escape_content;
/// assert_eq!(
///     escape_content("<p class=\"x\">a & b</p>"),
///     "&lt;p class=\"x\"&gt;a &amp; b&lt;/p&gt;"
/// );
/// ```
#[inline]
pub fn escape_content(s: &str) -> String {
    CONTENT_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;"])
}

/// Unescape XML element text escaped with [`escape_content`].
#[inline]
pub fn unescape_content(s: &str) -> String {
    CONTENT_UNESCAPER.replace_all(s, &["&", "<", ">"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_round_trip() {
        let s = "a<b>&\"quoted\" 'single'";
        assert_eq!(unescape_attribute(&escape_attribute(s)), s);
    }

    #[test]
    fn test_content_preserves_quotes() {
        let html = "<a href=\"http://example.com\">it's here</a>";
        let escaped = escape_content(html);
        assert!(escaped.contains("\"http://example.com\""));
        assert!(escaped.contains("it's"));
        assert!(!escaped.contains('<'));
        assert_eq!(unescape_content(&escaped), html);
    }

    #[test]
    fn test_attribute_escapes_all_five() {
        assert_eq!(
            escape_attribute("&<>\"'"),
            "&amp;&lt;&gt;&quot;&apos;"
        );
    }

    #[test]
    fn test_unescape_leaves_unknown_entities() {
        assert_eq!(unescape_attribute("&copy;"), "&copy;");
        assert_eq!(unescape_attribute("&amp"), "&amp");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_attribute_round_trip(s in "\\PC*") {
                prop_assert_eq!(unescape_attribute(&escape_attribute(&s)), s);
            }

            #[test]
            fn prop_content_round_trip(s in "\\PC*") {
                prop_assert_eq!(unescape_content(&escape_content(&s)), s);
            }

            #[test]
            fn prop_escaped_attribute_has_no_specials(s in "\\PC*") {
                let escaped = escape_attribute(&s);
                prop_assert!(!escaped.contains('<'));
                prop_assert!(!escaped.contains('>'));
                prop_assert!(!escaped.contains('"'));
                prop_assert!(!escaped.contains('\''));
            }

            #[test]
            fn prop_escaped_content_keeps_quotes(s in "[\"'a-z &<>]{0,40}") {
                let escaped = escape_content(&s);
                prop_assert_eq!(
                    escaped.matches('"').count(),
                    s.matches('"').count()
                );
                prop_assert!(!escaped.contains('<'));
            }
        }
    }
}
