//! Tolerant response decoding.
//!
//! The store under test answers most API calls with JSON, but some error and
//! debug paths wrap that JSON inside an HTML page. [`decode_body`] parses the
//! body strictly first and, failing that, parses the greedy span running from
//! the first `{` to the last `}`.
//!
//! The greedy span is a heuristic. A body carrying two separate top-level
//! objects yields a span that straddles both, and that span is rejected
//! rather than trimmed down to the first balanced object.
//!
//! Both paths share serde_json's recursion limit: a document nested more
//! than [`MAX_NESTING_DEPTH`] arrays or objects deep is reported as
//! undecodable, even when it is valid JSON.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::result::{ProbeError, ProbeResult};

/// Nesting depth beyond which serde_json refuses to parse
pub const MAX_NESTING_DEPTH: usize = 128;

/// Outcome of a tolerant decode, tagged with the path that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The whole body parsed as JSON
    Strict(Value),
    /// JSON was recovered from the brace span inside a wrapper document
    Embedded(Value),
    /// Neither path produced JSON
    Undecodable,
}

impl Decoded {
    /// Consume the outcome, keeping only the value
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Strict(value) | Self::Embedded(value) => Some(value),
            Self::Undecodable => None,
        }
    }

    /// Borrow the decoded value, if any
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Strict(value) | Self::Embedded(value) => Some(value),
            Self::Undecodable => None,
        }
    }

    /// Whether the fallback path was needed
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }

    /// Short label for logs and CLI output
    #[must_use]
    pub const fn source_label(&self) -> &'static str {
        match self {
            Self::Strict(_) => "strict",
            Self::Embedded(_) => "embedded",
            Self::Undecodable => "undecodable",
        }
    }
}

/// Greedy span from the first `{` to the last `}` in `body`.
///
/// Returns `None` when either brace is missing or the last `}` precedes the
/// first `{`.
#[must_use]
pub fn embedded_span(body: &str) -> Option<&str> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&body[start..=end])
}

/// Decode `body`, reporting which path succeeded.
#[must_use]
pub fn decode_with_source(body: &str) -> Decoded {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return Decoded::Strict(value);
    }

    match embedded_span(body).map(serde_json::from_str::<Value>) {
        Some(Ok(value)) => {
            tracing::debug!(body_len = body.len(), "recovered JSON embedded in wrapper");
            Decoded::Embedded(value)
        }
        Some(Err(err)) => {
            tracing::debug!(body_len = body.len(), error = %err, "embedded span is not JSON");
            Decoded::Undecodable
        }
        None => Decoded::Undecodable,
    }
}

/// Decode a response body that is nominally JSON.
///
/// `None` signals that no JSON could be recovered; it is never an error.
/// A body that is literally `null` decodes to `Some(Value::Null)`.
#[must_use]
pub fn decode_body(body: &str) -> Option<Value> {
    decode_with_source(body).into_value()
}

/// Decode tolerantly, then deserialize into `T`.
pub fn decode_as<T: DeserializeOwned>(body: &str) -> ProbeResult<T> {
    let value = decode_body(body).ok_or(ProbeError::Undecodable { len: body.len() })?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    mod strict_path_tests {
        use super::*;

        #[test]
        fn test_plain_object() {
            let body = r#"{"responseCode":200,"products":[]}"#;
            assert_eq!(
                decode_body(body),
                Some(json!({"responseCode": 200, "products": []}))
            );
        }

        #[test]
        fn test_scalars_and_arrays() {
            assert_eq!(decode_body("[1,2,3]"), Some(json!([1, 2, 3])));
            assert_eq!(decode_body("42"), Some(json!(42)));
            assert_eq!(decode_body("\"text\""), Some(json!("text")));
            assert_eq!(decode_body("true"), Some(json!(true)));
        }

        #[test]
        fn test_literal_null_is_a_value() {
            assert_eq!(decode_body("null"), Some(Value::Null));
        }

        #[test]
        fn test_surrounding_whitespace() {
            assert_eq!(decode_body("  \n{\"a\":1}\n "), Some(json!({"a": 1})));
        }

        #[test]
        fn test_reports_strict_source() {
            let decoded = decode_with_source(r#"{"a":1}"#);
            assert_eq!(decoded, Decoded::Strict(json!({"a": 1})));
            assert_eq!(decoded.source_label(), "strict");
            assert!(!decoded.is_embedded());
        }
    }

    mod fallback_path_tests {
        use super::*;

        #[test]
        fn test_json_inside_html() {
            let body = format!(
                "<html><body>noise{}more noise</html>",
                json!({"a": 1, "b": [1, 2]})
            );
            assert_eq!(decode_body(&body), Some(json!({"a": 1, "b": [1, 2]})));
        }

        #[test]
        fn test_reports_embedded_source() {
            let decoded = decode_with_source("<pre>{\"responseCode\": 405}</pre>");
            assert!(decoded.is_embedded());
            assert_eq!(decoded.value(), Some(&json!({"responseCode": 405})));
        }

        #[test]
        fn test_nested_braces_stay_inside_span() {
            let body = r#"<div>{"user":{"name":"Haim","address":{"city":"Tel Aviv"}}}</div>"#;
            assert_eq!(
                decode_body(body),
                Some(json!({"user": {"name": "Haim", "address": {"city": "Tel Aviv"}}}))
            );
        }

        #[test]
        fn test_multiline_wrapper() {
            let body = "<html>\n<body>\n{\n  \"message\": \"User exists!\"\n}\n</body>\n</html>";
            assert_eq!(decode_body(body), Some(json!({"message": "User exists!"})));
        }

        #[test]
        fn test_brace_in_wrapper_text_breaks_recovery() {
            let body = r#"<style>p { color: red }</style>{"a":1}"#;
            assert_eq!(decode_body(body), None);
        }
    }

    mod failure_path_tests {
        use super::*;

        #[test]
        fn test_empty_body() {
            assert_eq!(decode_body(""), None);
            assert_eq!(decode_with_source(""), Decoded::Undecodable);
        }

        #[test]
        fn test_prose() {
            assert_eq!(decode_body("not json at all"), None);
        }

        #[test]
        fn test_unterminated_object() {
            assert_eq!(decode_body("{broken"), None);
        }

        #[test]
        fn test_closing_brace_before_opening() {
            assert_eq!(embedded_span("} then {"), None);
            assert_eq!(decode_body("} then {"), None);
        }

        #[test]
        fn test_two_disjoint_objects_are_rejected() {
            // greedy span is `{"a":1} and {"b":2}`, which is not one object
            let body = r#"first {"a":1} and {"b":2} last"#;
            assert_eq!(embedded_span(body), Some(r#"{"a":1} and {"b":2}"#));
            assert_eq!(decode_body(body), None);
        }

        #[test]
        fn test_adjacent_objects_are_rejected() {
            assert_eq!(decode_body(r#"{"a":1}{"b":2}"#), None);
        }
    }

    mod nesting_limit_tests {
        use super::*;

        fn nested_arrays(depth: usize) -> String {
            format!("{}{}", "[".repeat(depth), "]".repeat(depth))
        }

        #[test]
        fn test_nesting_within_limit() {
            assert!(decode_body(&nested_arrays(MAX_NESTING_DEPTH - 28)).is_some());
        }

        #[test]
        fn test_nesting_beyond_limit_is_undecodable() {
            let body = nested_arrays(MAX_NESTING_DEPTH + 72);
            assert_eq!(decode_with_source(&body), Decoded::Undecodable);
        }

        #[test]
        fn test_wrapped_nesting_beyond_limit_is_undecodable() {
            let inner = "{\"a\":".repeat(MAX_NESTING_DEPTH + 72);
            let body = format!("<p>{inner}1{}</p>", "}".repeat(MAX_NESTING_DEPTH + 72));
            assert_eq!(decode_body(&body), None);
        }
    }

    mod typed_decode_tests {
        use super::*;

        #[derive(Debug, Deserialize, PartialEq)]
        struct Envelope {
            #[serde(rename = "responseCode")]
            response_code: i64,
            message: String,
        }

        #[test]
        fn test_decode_as_embedded() {
            let body = r#"<html>{"responseCode": 201, "message": "User created!"}</html>"#;
            let envelope: Envelope = decode_as(body).unwrap();
            assert_eq!(envelope.response_code, 201);
            assert_eq!(envelope.message, "User created!");
        }

        #[test]
        fn test_decode_as_undecodable() {
            match decode_as::<Envelope>("<html>oops</html>") {
                Err(ProbeError::Undecodable { len }) => assert_eq!(len, 17),
                other => panic!("expected Undecodable, got {other:?}"),
            }
        }

        #[test]
        fn test_decode_as_shape_mismatch() {
            let result = decode_as::<Envelope>(r#"{"responseCode": "x"}"#);
            assert!(matches!(result, Err(ProbeError::Json(_))));
        }
    }
}
