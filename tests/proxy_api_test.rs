// ============================================================================
// Proxy Route Tests
// ============================================================================
//
// End-to-end checks of the /api proxies:
// - field remapping (camelCase in, snake_case out) with optional-field
//   omission on coupon creation
// - verbatim relay of backend statuses and bodies
// - session cookie lifecycle around login and logout
// - query-string relay and the public shell configuration endpoint
//
// ============================================================================

use axum::http::StatusCode;
use serde_json::{json, Value};

use test_utils::{spawn_app, test_client, MockBackend};

fn set_cookie(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn value_only_coupon_reaches_backend_without_percent_off() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    test_client()
        .post(app.url("/api/coupons"))
        .header("Cookie", "authToken=admin-tok")
        .json(&json!({ "code": "SUMMER25", "value": 25 }))
        .send()
        .await
        .unwrap();

    let recorded = backend.last_request("POST", "/coupons").await.unwrap();
    let body = recorded.json_body();
    assert_eq!(body["code"], "SUMMER25");
    assert_eq!(body["value"], 25.0);
    assert!(body.get("percent_off").is_none());
    assert!(body.get("expires_at").is_none());
    assert!(body.get("max_uses").is_none());
}

#[tokio::test]
async fn coupon_percent_field_is_remapped_to_snake_case() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    test_client()
        .post(app.url("/api/coupons"))
        .header("Cookie", "authToken=admin-tok")
        .json(&json!({ "code": "TEN", "percentOff": 10, "maxUses": 100 }))
        .send()
        .await
        .unwrap();

    let recorded = backend.last_request("POST", "/coupons").await.unwrap();
    let body = recorded.json_body();
    assert_eq!(body["percent_off"], 10.0);
    assert_eq!(body["max_uses"], 100);
    assert!(body.get("percentOff").is_none());
    assert!(body.get("value").is_none());
}

#[tokio::test]
async fn backend_errors_relay_status_and_body_verbatim() {
    let backend = MockBackend::spawn().await;
    backend
        .set_response(
            "POST",
            "/coupons",
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "message": "Coupon code already exists" }),
        )
        .await;
    let app = spawn_app(&backend.url).await;

    let response = test_client()
        .post(app.url("/api/coupons"))
        .header("Cookie", "authToken=admin-tok")
        .json(&json!({ "code": "SUMMER25", "value": 25 }))
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.status(),
        reqwest::StatusCode::UNPROCESSABLE_ENTITY
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Coupon code already exists");
}

#[tokio::test]
async fn malformed_client_json_is_rejected_before_the_backend() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    let response = test_client()
        .post(app.url("/api/coupons"))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(backend.last_request("POST", "/coupons").await.is_none());
}

#[tokio::test]
async fn successful_login_sets_the_session_cookie() {
    let backend = MockBackend::spawn().await;
    backend
        .set_response(
            "POST",
            "/auth/login",
            StatusCode::OK,
            json!({ "data": { "token": "fresh-tok" }, "message": "Welcome back" }),
        )
        .await;
    let app = spawn_app(&backend.url).await;

    let response = test_client()
        .post(app.url("/api/auth/login"))
        .json(&json!({ "email": "traveler@example.com", "password": "pw" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let cookie = set_cookie(&response).expect("expected a session Set-Cookie");
    assert!(cookie.starts_with("authToken=fresh-tok;"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));

    // The body still relays the backend's envelope
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Welcome back");
}

#[tokio::test]
async fn failed_login_sets_no_cookie() {
    let backend = MockBackend::spawn().await;
    backend
        .set_response(
            "POST",
            "/auth/login",
            StatusCode::UNAUTHORIZED,
            json!({ "message": "Invalid credentials" }),
        )
        .await;
    let app = spawn_app(&backend.url).await;

    let response = test_client()
        .post(app.url("/api/auth/login"))
        .json(&json!({ "email": "traveler@example.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).is_none());
}

#[tokio::test]
async fn logout_expires_the_cookie_without_a_backend_call() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    let response = test_client()
        .post(app.url("/api/auth/logout"))
        .header("Cookie", "authToken=tok-1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with("authToken=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(backend.requests().await.is_empty());
}

#[tokio::test]
async fn signup_fields_are_remapped_for_the_backend() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    test_client()
        .post(app.url("/api/auth/signup"))
        .json(&json!({
            "firstName": "Nino",
            "lastName": "Beridze",
            "email": "nino@example.com",
            "password": "pw"
        }))
        .send()
        .await
        .unwrap();

    let recorded = backend.last_request("POST", "/auth/signup").await.unwrap();
    let body = recorded.json_body();
    assert_eq!(body["first_name"], "Nino");
    assert_eq!(body["last_name"], "Beridze");
    assert!(body.get("firstName").is_none());
}

#[tokio::test]
async fn image_upload_relays_the_multipart_form() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    let part = reqwest::multipart::Part::bytes(b"fake-jpeg-bytes".to_vec())
        .file_name("cover.jpg")
        .mime_str("image/jpeg")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("image", part);

    let response = test_client()
        .post(app.url("/api/adventures/42/image"))
        .header("Cookie", "authToken=admin-tok")
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let recorded = backend
        .last_request("POST", "/adventures/42/image")
        .await
        .unwrap();
    assert_eq!(recorded.header("authorization"), Some("Bearer admin-tok"));
    assert!(recorded
        .header("content-type")
        .is_some_and(|ct| ct.starts_with("multipart/form-data; boundary=")));

    // The rebuilt form keeps the part name, filename, MIME type and bytes
    let body = String::from_utf8_lossy(&recorded.body);
    assert!(body.contains("name=\"image\""));
    assert!(body.contains("filename=\"cover.jpg\""));
    assert!(body.contains("Content-Type: image/jpeg"));
    assert!(body.contains("fake-jpeg-bytes"));
}

#[tokio::test]
async fn list_queries_are_relayed_to_the_backend() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    test_client()
        .get(app.url("/api/adventures?page=2&search=hiking"))
        .send()
        .await
        .unwrap();

    let recorded = backend.last_request("GET", "/adventures").await.unwrap();
    assert_eq!(recorded.query.as_deref(), Some("page=2&search=hiking"));
}

#[tokio::test]
async fn shell_config_is_public_and_camel_cased() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    let response = test_client()
        .get(app.url("/api/config"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["imageBaseUrl"], "https://img.journey.test");
    assert_eq!(body["defaultLocale"], "en");
    assert_eq!(body["supportedLocales"], json!(["en", "ka"]));
    assert!(backend.requests().await.is_empty());
}

#[tokio::test]
async fn readiness_follows_backend_reachability() {
    let backend = MockBackend::spawn().await;
    let app = spawn_app(&backend.url).await;

    let response = test_client()
        .get(app.url("/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let dead_app = spawn_app(&test_utils::unreachable_backend_url().await).await;
    let response = test_client()
        .get(dead_app.url("/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.status(),
        reqwest::StatusCode::SERVICE_UNAVAILABLE
    );
}
