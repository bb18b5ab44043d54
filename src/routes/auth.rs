// ============================================================================
// Authentication Routes
// ============================================================================
//
// Endpoints:
// - POST /api/auth/login - Sign in with email and password
// - POST /api/auth/signup - Create an account
// - POST /api/auth/verify-otp - Confirm the one-time code sent by email
// - POST /api/auth/resend-otp - Request a fresh one-time code
// - POST /api/auth/forgot-password - Start a password reset
// - POST /api/auth/reset-password - Complete a password reset
// - POST /api/auth/logout - Expire the session cookie (no backend call)
//
// Credentials are never checked here; every flow is relayed to the backend.
// The one thing these handlers add over the plain proxies is the session
// cookie lifecycle: when the backend replies 2xx with a token in data.token,
// the reply gains a Set-Cookie establishing the session.
//
// ============================================================================

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::AppError;
use crate::gateway::{BackendResponse, Envelope};
use crate::routes::extractors::ClientLocale;
use crate::session;
use crate::utils::log_safe_id;

/// Token field of a successful auth reply
#[derive(Debug, Deserialize)]
struct AuthData {
    token: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Relay the backend's auth reply, establishing the session cookie when the
/// reply carries a token
fn relay_with_session(ctx: &AppContext, backend: BackendResponse) -> Response {
    let token = if backend.is_success() {
        backend
            .json::<Envelope<AuthData>>()
            .ok()
            .and_then(|envelope| envelope.data)
            .map(|data| data.token)
    } else {
        None
    };

    let mut response = backend.into_response();
    if let Some(token) = token {
        match session::build_session_cookie(&ctx.config.cookie, &token) {
            Ok(cookie) => {
                response.headers_mut().insert(SET_COOKIE, cookie);
            }
            Err(e) => e.log(),
        }
    }
    response
}

/// POST /api/auth/login
pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let backend = ctx
        .backend
        .send_json(Method::POST, "/auth/login", None, &locale, &request)
        .await?;

    tracing::info!(
        email_hash = %log_safe_id(&request.email, &ctx.config.log_salt),
        success = backend.is_success(),
        "Login attempt"
    );

    Ok(relay_with_session(&ctx, backend))
}

/// POST /api/auth/signup
pub async fn signup(
    State(ctx): State<Arc<AppContext>>,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let backend = ctx
        .backend
        .send_json(Method::POST, "/auth/signup", None, &locale, &request)
        .await?;

    tracing::info!(
        email_hash = %log_safe_id(&request.email, &ctx.config.log_salt),
        success = backend.is_success(),
        "Signup attempt"
    );

    Ok(relay_with_session(&ctx, backend))
}

/// POST /api/auth/verify-otp
pub async fn verify_otp(
    State(ctx): State<Arc<AppContext>>,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let backend = ctx
        .backend
        .send_json(Method::POST, "/auth/verify-otp", None, &locale, &request)
        .await?;

    Ok(relay_with_session(&ctx, backend))
}

/// POST /api/auth/resend-otp
pub async fn resend_otp(
    State(ctx): State<Arc<AppContext>>,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<EmailRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(Method::POST, "/auth/resend-otp", None, &locale, &request)
        .await?)
}

/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(ctx): State<Arc<AppContext>>,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<EmailRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::POST,
            "/auth/forgot-password",
            None,
            &locale,
            &request,
        )
        .await?)
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(ctx): State<Arc<AppContext>>,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(Method::POST, "/auth/reset-password", None, &locale, &request)
        .await?)
}

/// POST /api/auth/logout
/// The token is opaque to the backend once discarded; logging out is purely
/// expiring the cookie
pub async fn logout(State(ctx): State<Arc<AppContext>>) -> Result<impl IntoResponse, AppError> {
    let cookie = session::build_delete_cookie(&ctx.config.cookie)?;

    let mut response = (
        StatusCode::OK,
        Json(json!({ "data": null, "message": "Logged out" })),
    )
        .into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_fields_serialize_snake_case() {
        let request: SignupRequest = serde_json::from_value(json!({
            "firstName": "Nino",
            "lastName": "Beridze",
            "email": "nino@example.com",
            "password": "pw"
        }))
        .unwrap();

        let sent = serde_json::to_value(&request).unwrap();
        assert_eq!(sent["first_name"], "Nino");
        assert_eq!(sent["last_name"], "Beridze");
        assert!(sent.get("firstName").is_none());
    }
}
