// ============================================================================
// Profile Routes
// ============================================================================
//
// Endpoints:
// - GET /api/profile - Current account details
// - PATCH /api/profile - Update name / phone number
// - PUT /api/profile/email - Change email (requires password)
// - PUT /api/profile/password - Change password
//
// All proxies over the backend's /user resource; the backend decides whether
// the forwarded token is valid and its 401 is relayed verbatim.
//
// ============================================================================

use axum::{extract::State, http::Method, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::extractors::{ClientLocale, Session};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct ChangeEmailRequest {
    pub new_email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// GET /api/profile
pub async fn get_profile(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(Method::GET, "/user", session.token(), &locale)
        .await?)
}

/// PATCH /api/profile
pub async fn update_profile(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(Method::PATCH, "/user", session.token(), &locale, &request)
        .await?)
}

/// PUT /api/profile/email
pub async fn change_email(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<ChangeEmailRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::PUT,
            "/user/email",
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// PUT /api/profile/password
pub async fn change_password(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::PUT,
            "/user/password",
            session.token(),
            &locale,
            &request,
        )
        .await?)
}
