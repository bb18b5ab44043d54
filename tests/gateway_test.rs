// ============================================================================
// Gateway Contract Tests
// ============================================================================
//
// Over-the-wire checks of the outbound request contract:
// - Accept-Language carries the negotiated locale
// - Authorization: Bearer appears exactly when a session cookie is present
// - transport failures become a 503 {"data": null, "error"} reply
//
// ============================================================================

use serde_json::Value;

use test_utils::{spawn_app, test_client, unreachable_backend_url, MockBackend};

#[tokio::test]
async fn accept_language_carries_each_supported_locale() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;
    let client = test_client();

    for locale in ["en", "ka"] {
        client
            .get(app.url("/api/adventures"))
            .header("Accept-Language", locale)
            .send()
            .await
            .unwrap();

        let recorded = backend.last_request("GET", "/adventures").await.unwrap();
        assert_eq!(recorded.header("accept-language"), Some(locale));
    }
}

#[tokio::test]
async fn unsupported_accept_language_falls_back_to_default() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    test_client()
        .get(app.url("/api/levels"))
        .header("Accept-Language", "fr-FR,de;q=0.8")
        .send()
        .await
        .unwrap();

    let recorded = backend.last_request("GET", "/levels").await.unwrap();
    assert_eq!(recorded.header("accept-language"), Some("en"));
}

#[tokio::test]
async fn session_cookie_becomes_bearer_token() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    test_client()
        .get(app.url("/api/profile"))
        .header("Cookie", "authToken=session-tok-1")
        .send()
        .await
        .unwrap();

    let recorded = backend.last_request("GET", "/user").await.unwrap();
    assert_eq!(
        recorded.header("authorization"),
        Some("Bearer session-tok-1")
    );
}

#[tokio::test]
async fn no_cookie_means_no_authorization_header() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    test_client()
        .get(app.url("/api/adventures"))
        .send()
        .await
        .unwrap();

    let recorded = backend.last_request("GET", "/adventures").await.unwrap();
    assert_eq!(recorded.header("authorization"), None);
}

#[tokio::test]
async fn outbound_requests_disable_caching_and_carry_request_id() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    test_client()
        .get(app.url("/api/coupons"))
        .send()
        .await
        .unwrap();

    let recorded = backend.last_request("GET", "/coupons").await.unwrap();
    assert_eq!(recorded.header("cache-control"), Some("no-store"));
    assert_eq!(recorded.header("accept"), Some("application/json"));
    assert!(recorded.header("x-request-id").is_some());
}

#[tokio::test]
async fn unreachable_backend_resolves_as_503_error_body() {
    let app = spawn_app(&unreachable_backend_url().await).await;

    let response = test_client()
        .get(app.url("/api/coupons"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], Value::Null);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}
