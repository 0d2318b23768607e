use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::{ApiErrorDetail, ErrorEnvelope};

/// Request fields clients may get wrong.
const KNOWN_FIELDS: &[&str] = &["question"];

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn guess_field(msg: &str) -> Option<String> {
    KNOWN_FIELDS
        .iter()
        .find(|key| msg.contains(*key))
        .map(|key| key.to_string())
}

fn hint_for(msg: &str) -> Option<String> {
    if msg.contains("missing field") {
        Some("Provide a `question` string.".into())
    } else if msg.contains("invalid type") {
        Some("`question` must be a string.".into())
    } else if msg.contains("expected value") || msg.contains("EOF") {
        Some("Body must be a JSON object (e.g. { \"question\": \"...\" }).".into())
    } else {
        None
    }
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts
        .headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
    {
        return v.to_string();
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(value) = HeaderValue::from_str(&id) {
        parts.headers.insert("X-Request-Id", value);
    }
    id
}

/// Rewrites 400/422 extractor rejections into an [`ErrorEnvelope`].
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if !(status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY) {
        return res;
    }

    let (mut parts, bytes) = take_body(res).await;
    let original = String::from_utf8_lossy(&bytes);
    let req_id = ensure_request_id(&mut parts);
    debug!(%status, request_id = %req_id, "request rejected");

    let detail = ApiErrorDetail {
        path: guess_field(&original),
        hint: hint_for(&original),
    };

    let envelope = ErrorEnvelope::new(
        if status == StatusCode::BAD_REQUEST {
            "BAD_REQUEST"
        } else {
            "UNPROCESSABLE_ENTITY"
        },
        original.trim(),
        vec![detail],
    );

    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, Body::from(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_and_hint_from_serde_message() {
        let msg = "Failed to deserialize query string: missing field `question`";
        assert_eq!(guess_field(msg).as_deref(), Some("question"));
        assert!(hint_for(msg).unwrap().contains("question"));
        assert_eq!(guess_field("something else"), None);
    }
}
