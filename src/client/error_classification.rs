//! 非 2xx 响应到 `ServiceError` 的转换。
//!
//! Non-2xx response classification.

use crate::error::ServiceError;
use crate::transport::HttpResponse;
use reqwest::StatusCode;
use serde_json::Value;

// Checked in order; the first string found wins.
const MESSAGE_FIELDS: [&str; 4] = ["error", "message", "errorMessage", "error_description"];

/// Build a [`ServiceError`] from a non-2xx response, keeping status, headers and raw body.
pub(crate) fn service_error_from_response(response: HttpResponse) -> ServiceError {
    let body = response.text();
    let parsed: Option<Value> = serde_json::from_str(&body).ok();

    let message = parsed
        .as_ref()
        .and_then(message_from_json)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| canonical_reason(response.status));
    let code = parsed.as_ref().and_then(code_from_json);

    ServiceError {
        status: response.status,
        code,
        message,
        body,
        headers: response.headers,
    }
}

fn message_from_json(json: &Value) -> Option<String> {
    MESSAGE_FIELDS.iter().find_map(|field| match json.get(*field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        // {"error": {"message": "...", "code": ...}}
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

fn code_from_json(json: &Value) -> Option<String> {
    let code = json
        .get("code")
        .or_else(|| json.get("error").and_then(|e| e.get("code")))?;
    match code {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn canonical_reason(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code::ServiceErrorKind;
    use reqwest::header::HeaderMap;

    fn classify(status: u16, body: &str) -> ServiceError {
        service_error_from_response(HttpResponse::new(status, HeaderMap::new(), body.to_string()))
    }

    #[test]
    fn structured_body_yields_code_and_message() {
        let err = classify(404, r#"{"code":404,"error":"Model not found"}"#);
        assert_eq!(err.status, 404);
        assert_eq!(err.code.as_deref(), Some("404"));
        assert_eq!(err.message, "Model not found");
        assert_eq!(err.kind(), ServiceErrorKind::NotFound);
    }

    #[test]
    fn message_field_precedence() {
        let err = classify(400, r#"{"message":"second","errorMessage":"third"}"#);
        assert_eq!(err.message, "second");

        let err = classify(400, r#"{"errorMessage":"third","error_description":"fourth"}"#);
        assert_eq!(err.message, "third");

        let err = classify(401, r#"{"error_description":"fourth","code":"BXNIM0415E"}"#);
        assert_eq!(err.message, "fourth");
        assert_eq!(err.code.as_deref(), Some("BXNIM0415E"));
    }

    #[test]
    fn nested_error_object() {
        let err = classify(429, r#"{"error":{"message":"slow down","code":"rate_limit"}}"#);
        assert_eq!(err.message, "slow down");
        assert_eq!(err.code.as_deref(), Some("rate_limit"));
        assert!(err.kind().retryable());
    }

    #[test]
    fn raw_body_is_the_message_when_not_json() {
        let err = classify(500, "Internal Server Error: upstream crashed\n");
        assert_eq!(err.message, "Internal Server Error: upstream crashed");
        assert_eq!(err.body, "Internal Server Error: upstream crashed\n");
        assert!(err.code.is_none());
    }

    #[test]
    fn empty_body_falls_back_to_reason_phrase() {
        assert_eq!(classify(503, "").message, "Service Unavailable");
        assert_eq!(classify(599, "").message, "HTTP 599");
    }

    #[test]
    fn json_without_known_fields_uses_body() {
        let err = classify(400, r#"{"unexpected":true}"#);
        assert_eq!(err.message, r#"{"unexpected":true}"#);
    }
}
