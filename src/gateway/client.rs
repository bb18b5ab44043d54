// ============================================================================
// Backend Client
// ============================================================================
//
// HTTP client for the external booking API. Every server-to-backend call in
// the application is built by this module, so the outbound contract lives in
// exactly one place:
// - Authorization: Bearer <token> when a session token is present
// - Accept-Language: the resolved locale
// - Accept / Content-Type: application/json (multipart for uploads)
// - Cache-Control: no-store
// - X-Request-Id for correlating backend logs
//
// Transport failures (DNS, refused connections, timeouts) never surface as
// errors; they become a synthetic 503 reply with a `{data: null, error}`
// body. Backend 4xx/5xx statuses pass through untouched.
//
// ============================================================================

use std::time::Duration;

use axum::http::Method;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::error::AppResult;
use crate::gateway::response::BackendResponse;
use crate::locale::Locale;

/// HTTP client for forwarding calls to the booking backend
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> AppResult<Self> {
        // Connection pooling and keep-alive for the per-navigation profile
        // fetches the middleware performs
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Common part of every outbound request
    fn base_request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        locale: &Locale,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json")
            .header("Accept-Language", locale.as_str())
            .header("Cache-Control", "no-store")
            .header("X-Request-Id", Uuid::new_v4().to_string());

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    /// Build a JSON request without sending it.
    ///
    /// Separate from the send path so header construction stays testable
    /// without network I/O.
    pub fn build_request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        locale: &Locale,
        body: Option<&T>,
    ) -> AppResult<reqwest::Request> {
        let builder = self.base_request(method, path, token, locale);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder.header("Content-Type", "application/json"),
        };

        Ok(builder.build()?)
    }

    /// Issue a bodyless call (GET, DELETE)
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        locale: &Locale,
    ) -> AppResult<BackendResponse> {
        let request = self.build_request::<serde_json::Value>(method, path, token, locale, None)?;
        Ok(self.execute(request).await)
    }

    /// Issue a call with a JSON body (POST, PUT, PATCH)
    pub async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        locale: &Locale,
        body: &T,
    ) -> AppResult<BackendResponse> {
        let request = self.build_request(method, path, token, locale, Some(body))?;
        Ok(self.execute(request).await)
    }

    /// Forward a multipart form (file uploads); the form supplies its own
    /// boundary content-type
    pub async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        locale: &Locale,
        form: reqwest::multipart::Form,
    ) -> AppResult<BackendResponse> {
        let request = self
            .base_request(method, path, token, locale)
            .multipart(form)
            .build()?;
        Ok(self.execute(request).await)
    }

    async fn execute(&self, request: reqwest::Request) -> BackendResponse {
        let path = request.url().path().to_string();
        match self.client.execute(request).await {
            Ok(response) => BackendResponse::from_reqwest(response).await,
            Err(e) => {
                warn!(error = %e, path = %path, "Backend request failed at transport level");
                BackendResponse::transport_failure(&e)
            }
        }
    }

    /// Check whether the backend is reachable; used by the readiness probe
    pub async fn check_health(&self) -> bool {
        let health_url = format!("{}/health", self.base_url);
        match self
            .client
            .get(&health_url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Backend health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locales;
    use serde_json::json;

    fn test_client() -> BackendClient {
        BackendClient::new("http://backend.test/api", 5).unwrap()
    }

    fn test_locales() -> Locales {
        Locales::new(vec!["en".to_string(), "ka".to_string()], "en".to_string())
    }

    #[test]
    fn sets_accept_language_for_every_supported_locale() {
        let client = test_client();
        let locales = test_locales();

        for code in locales.supported() {
            let locale = locales.negotiate(Some(code.as_str()));
            let request = client
                .build_request::<serde_json::Value>(Method::GET, "/adventures", None, &locale, None)
                .unwrap();

            assert_eq!(
                request.headers().get("Accept-Language").unwrap(),
                code.as_str()
            );
        }
    }

    #[test]
    fn bearer_header_present_only_with_token() {
        let client = test_client();
        let locale = test_locales().default_locale();

        let with_token = client
            .build_request::<serde_json::Value>(
                Method::GET,
                "/user",
                Some("secret-token"),
                &locale,
                None,
            )
            .unwrap();
        assert_eq!(
            with_token.headers().get("Authorization").unwrap(),
            "Bearer secret-token"
        );

        let without_token = client
            .build_request::<serde_json::Value>(Method::GET, "/user", None, &locale, None)
            .unwrap();
        assert!(without_token.headers().get("Authorization").is_none());
    }

    #[test]
    fn json_headers_and_caching_disabled() {
        let client = test_client();
        let locale = test_locales().default_locale();

        let request = client
            .build_request::<serde_json::Value>(Method::GET, "/levels", None, &locale, None)
            .unwrap();

        let headers = request.headers();
        assert_eq!(headers.get("Accept").unwrap(), "application/json");
        assert_eq!(headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(headers.get("Cache-Control").unwrap(), "no-store");
        assert!(headers.get("X-Request-Id").is_some());
    }

    #[test]
    fn serializes_json_body_and_target_url() {
        let client = test_client();
        let locale = test_locales().default_locale();
        let payload = json!({"code": "SUMMER", "value": 50});

        let request = client
            .build_request(Method::POST, "/coupons", Some("t"), &locale, Some(&payload))
            .unwrap();

        assert_eq!(request.url().as_str(), "http://backend.test/api/coupons");
        assert_eq!(request.method(), Method::POST);
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let sent: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(sent, payload);
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = BackendClient::new("http://backend.test/api/", 5).unwrap();
        let locale = test_locales().default_locale();

        let request = client
            .build_request::<serde_json::Value>(Method::GET, "/coupons", None, &locale, None)
            .unwrap();

        assert_eq!(request.url().as_str(), "http://backend.test/api/coupons");
    }
}
