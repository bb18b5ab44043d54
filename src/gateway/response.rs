use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};

/// Standard backend envelope: `{ data: ..., message?: ... }`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A raw backend reply: status and body, not pre-parsed.
///
/// Callers decide how to interpret it: proxy handlers relay it verbatim,
/// the middleware and auth handlers decode the envelope first.
#[derive(Debug)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl BackendResponse {
    /// Consume a reqwest response; body read failures degrade to a
    /// transport-failure reply.
    pub async fn from_reqwest(response: reqwest::Response) -> Self {
        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        match response.bytes().await {
            Ok(body) => Self {
                status,
                content_type,
                body,
            },
            Err(e) => Self::transport_failure(&e),
        }
    }

    /// Synthetic reply standing in for a failed transport attempt. The body
    /// keeps the `{data: null, error}` shape the web shell expects.
    pub fn transport_failure(cause: &reqwest::Error) -> Self {
        let body = json!({ "data": null, "error": cause.to_string() });
        let bytes = serde_json::to_vec(&body)
            .unwrap_or_else(|_| b"{\"data\":null,\"error\":\"transport failure\"}".to_vec());

        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            content_type: Some(HeaderValue::from_static("application/json")),
            body: Bytes::from(bytes),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as typed JSON
    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| AppError::upstream(format!("invalid JSON from backend: {}", e)))
    }
}

impl IntoResponse for BackendResponse {
    /// Relay the backend's status and body verbatim to the browser
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        response
    }
}
