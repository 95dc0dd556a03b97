//! Input sanitization functions
//!
//! Strips HTML markup from strings found anywhere inside a JSON value before
//! the record is persisted. Equivalent to a zero-allowed-tags,
//! zero-allowed-attributes policy that keeps inner text content.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// script/style elements whose text content must not survive
    static ref DROPPED_ELEMENT: Regex =
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)[^>]*>").unwrap();

    /// An unterminated script/style open tag swallows the rest of the input
    static ref DROPPED_ELEMENT_TAIL: Regex = Regex::new(r"(?is)<(script|style)\b.*$").unwrap();

    /// HTML comments
    static ref HTML_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();

    /// Any remaining markup tag, attributes included
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Strip all HTML markup from a string, preserving text content.
///
/// `<b>Bold</b> text` becomes `Bold text`; `<script>alert(1)</script>Hello`
/// becomes `Hello` (script bodies are markup, not content). Idempotent, and
/// the identity on markup-free text.
pub fn strip_html(value: &str) -> String {
    let value = DROPPED_ELEMENT.replace_all(value, "");
    let value = DROPPED_ELEMENT_TAIL.replace_all(&value, "");
    let value = HTML_COMMENT.replace_all(&value, "");
    HTML_TAG.replace_all(&value, "").into_owned()
}

/// Recursively strip HTML from every string leaf of a JSON value.
///
/// Strings are rewritten with [`strip_html`]; arrays keep their order and
/// length; objects keep their key set (keys are never altered); numbers,
/// booleans and null pass through unchanged.
pub fn sanitize_value(value: &mut Value) {
    match value {
        Value::String(s) => {
            *s = strip_html(s);
        }
        Value::Array(items) => {
            for item in items {
                sanitize_value(item);
            }
        }
        Value::Object(map) => {
            for (_, v) in map.iter_mut() {
                sanitize_value(v);
            }
        }
        _ => {}
    }
}

/// Owned variant of [`sanitize_value`].
pub fn sanitize(mut value: Value) -> Value {
    sanitize_value(&mut value);
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preserves_safe_text() {
        assert_eq!(strip_html("Hello World 123"), "Hello World 123");
        assert_eq!(strip_html("no tags here"), "no tags here");
    }

    #[test]
    fn strips_tags_keeping_content() {
        assert_eq!(strip_html("<b>Bold</b> text"), "Bold text");
        assert_eq!(strip_html("<div><p>Test</p></div>"), "Test");
        assert_eq!(strip_html("<p>paragraph</p><br/>more"), "paragraphmore");
    }

    #[test]
    fn drops_script_elements_with_their_content() {
        let clean = strip_html("<script>alert(\"xss\")</script>Hello");
        assert_eq!(clean, "Hello");
        assert!(!clean.contains("<script"));
        assert!(!clean.contains("</script"));
    }

    #[test]
    fn drops_style_elements_with_their_content() {
        assert_eq!(strip_html("<style>body { display: none }</style>ok"), "ok");
    }

    #[test]
    fn drops_unterminated_script_to_end_of_input() {
        assert_eq!(strip_html("before<script>alert(1)"), "before");
    }

    #[test]
    fn removes_dangerous_attributes_entirely() {
        let clean = strip_html("<img src=\"x\" onerror=\"alert(1)\">");
        assert_eq!(clean, "");
        assert!(!clean.contains("onerror"));

        let clean = strip_html("<img src=x onerror=alert(1)>Property Name");
        assert_eq!(clean, "Property Name");
        assert!(!clean.contains("onerror"));
    }

    #[test]
    fn removes_html_comments() {
        assert_eq!(strip_html("a<!-- hidden -->b"), "ab");
    }

    #[test]
    fn is_idempotent() {
        let cases = [
            "Hello World",
            "<b>Bold</b> text",
            "<script>alert(1)</script>Hello",
            "<<b>>",
            "a < b and c > d",
            "<scr<b></b>ipt>leftover",
            "trailing <bracket",
        ];
        for case in cases {
            let once = strip_html(case);
            let twice = strip_html(&once);
            assert_eq!(once, twice, "not idempotent for {case:?}");
        }
    }

    #[test]
    fn sanitizes_string_leaves_in_objects() {
        let mut value = json!({
            "title": "<script>alert(\"xss\")</script>Safe Title",
            "description": "Normal text",
        });
        sanitize_value(&mut value);
        assert_eq!(value["title"], "Safe Title");
        assert_eq!(value["description"], "Normal text");
    }

    #[test]
    fn sanitizes_nested_objects() {
        let mut value = json!({
            "property": {
                "name": "<img src=x onerror=alert(1)>Property Name",
                "details": { "info": "<b>Bold</b> text" },
            }
        });
        sanitize_value(&mut value);
        assert_eq!(value["property"]["name"], "Property Name");
        assert_eq!(value["property"]["details"]["info"], "Bold text");
    }

    #[test]
    fn sanitizes_arrays_preserving_order_and_length() {
        let value = sanitize(json!(["<script>bad</script>Good", "Normal", "<b>Test</b>"]));
        assert_eq!(value, json!(["Good", "Normal", "Test"]));
    }

    #[test]
    fn leaves_non_string_values_untouched() {
        let mut value = json!({
            "price": 13000,
            "available": true,
            "rating": 4.5,
            "note": null,
        });
        let original = value.clone();
        sanitize_value(&mut value);
        assert_eq!(value, original);
    }

    #[test]
    fn keys_are_never_altered() {
        let value = sanitize(json!({ "<b>key</b>": "<b>value</b>" }));
        let map = value.as_object().unwrap();
        assert!(map.contains_key("<b>key</b>"));
        assert_eq!(map["<b>key</b>"], "value");
    }

    #[test]
    fn sanitizes_mixed_arrays_and_objects() {
        let value = sanitize(json!({
            "items": [
                { "name": "<script>xss</script>Item 1", "price": 100 },
                { "name": "Item 2", "price": 200 },
            ]
        }));
        assert_eq!(value["items"][0]["name"], "Item 1");
        assert_eq!(value["items"][0]["price"], 100);
        assert_eq!(value["items"][1]["name"], "Item 2");
    }

    #[test]
    fn sanitize_is_idempotent_on_structures() {
        let value = json!({
            "a": "<b>x</b>",
            "b": [ { "c": "<script>s</script>keep" }, 7 ],
        });
        let once = sanitize(value);
        let twice = sanitize(once.clone());
        assert_eq!(once, twice);
    }
}
