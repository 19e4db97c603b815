//! JSON request body sanitization
//!
//! Every request body is buffered and, if it parses as JSON, cleaned in two
//! passes before it reaches a handler:
//! - object keys starting with `$` or containing `.` are dropped, so query
//!   operators can never be smuggled into stored documents
//! - `<` and `>` inside string values are HTML-escaped
//!
//! The Content-Type header is not trusted: the GraphQL extractor reads any
//! non-multipart body as JSON, so the sanitizer does too. Bodies that do not
//! parse are passed through unchanged. Multipart bodies are refused with 415
//! since no route accepts uploads and their JSON parts could not be cleaned.

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Sanitizer settings
#[derive(Debug, Clone, Copy)]
pub struct SanitizeConfig {
    /// Largest body the sanitizer will buffer
    pub max_body_bytes: usize,
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("multipart/"))
        .unwrap_or(false)
}

/// Whether a key could be read as a query operator or a nested path
pub fn is_operator_key(key: &str) -> bool {
    key.starts_with('$') || key.contains('.')
}

/// Escape the characters that open and close HTML tags
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Sanitize a JSON value in place
pub fn sanitize_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|key, _| !is_operator_key(key));
            map.values_mut().for_each(sanitize_value);
        }
        Value::Array(items) => items.iter_mut().for_each(sanitize_value),
        Value::String(text) => {
            if text.contains(['<', '>']) {
                *text = escape_markup(text);
            }
        }
        _ => {}
    }
}

fn sanitize_body(bytes: Bytes) -> Bytes {
    let Ok(mut value) = serde_json::from_slice::<Value>(&bytes) else {
        return bytes;
    };
    sanitize_value(&mut value);
    match serde_json::to_vec(&value) {
        Ok(clean) => Bytes::from(clean),
        Err(e) => {
            tracing::warn!("Failed to re-encode sanitized body: {}", e);
            bytes
        }
    }
}

/// Middleware sanitizing request bodies
pub async fn sanitize_request(
    State(config): State<SanitizeConfig>,
    request: Request,
    next: Next,
) -> Response {
    if is_multipart(request.headers()) {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Multipart requests are not accepted",
        )
            .into_response();
    }

    let (mut parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, config.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Rejected request body: {}", e);
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    if bytes.is_empty() {
        return next.run(Request::from_parts(parts, Body::empty())).await;
    }

    let clean = sanitize_body(bytes);
    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(clean.len()));

    next.run(Request::from_parts(parts, Body::from(clean))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_keys() {
        assert!(is_operator_key("$gt"));
        assert!(is_operator_key("profile.name"));
        assert!(!is_operator_key("name"));
        assert!(!is_operator_key("price$"));
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
        assert_eq!(escape_markup("plain & simple"), "plain & simple");
    }

    #[test]
    fn test_sanitize_nested_value() {
        let mut value = json!({
            "query": "mutation { addClient(name: \"<b>x</b>\") { id } }",
            "variables": {
                "name": "<img src=x>",
                "filter": { "$ne": null, "ok": 1 },
                "a.b": "dropped",
                "list": ["<i>", { "$where": "1" }]
            }
        });

        sanitize_value(&mut value);

        assert_eq!(
            value,
            json!({
                "query": "mutation { addClient(name: \"&lt;b&gt;x&lt;/b&gt;\") { id } }",
                "variables": {
                    "name": "&lt;img src=x&gt;",
                    "filter": { "ok": 1 },
                    "list": ["&lt;i&gt;", {}]
                }
            })
        );
    }

    #[test]
    fn test_sanitize_body_passes_through_invalid_json() {
        let raw = Bytes::from_static(b"{ not json");
        assert_eq!(sanitize_body(raw.clone()), raw);
    }

    #[test]
    fn test_is_multipart() {
        let mut headers = HeaderMap::new();
        assert!(!is_multipart(&headers));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_multipart(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("Multipart/Form-Data; boundary=x"),
        );
        assert!(is_multipart(&headers));
    }

    #[test]
    fn test_sanitize_body_ignores_declared_type() {
        let raw = Bytes::from_static(br#"{"variables":{"name":"<script>x</script>","$gt":1}}"#);
        let clean: Value = serde_json::from_slice(&sanitize_body(raw)).unwrap();
        assert_eq!(
            clean,
            serde_json::json!({ "variables": { "name": "&lt;script&gt;x&lt;/script&gt;" } })
        );
    }
}
