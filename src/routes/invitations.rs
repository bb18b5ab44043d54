// ============================================================================
// Admin Invitation Routes
// ============================================================================
//
// Endpoints:
// - GET /api/invitations - List pending invitations (admin)
// - POST /api/invitations - Invite a new admin (admin)
// - DELETE /api/invitations/:id - Revoke an invitation (admin)
// - POST /api/invitations/accept - Accept an invitation (public, by token)
//
// Accepting an invitation creates the account but does not sign the caller
// in; only the login/signup/OTP flows establish a session cookie.
//
// ============================================================================

use axum::{
    extract::{Path, State},
    http::Method,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::extractors::{ClientLocale, Session};

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateInvitationRequest {
    pub email: String,
    pub role: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct AcceptInvitationRequest {
    pub token: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// GET /api/invitations
pub async fn list_invitations(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(Method::GET, "/invitations", session.token(), &locale)
        .await?)
}

/// POST /api/invitations
pub async fn create_invitation(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<CreateInvitationRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::POST,
            "/invitations",
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// DELETE /api/invitations/:id
pub async fn delete_invitation(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::DELETE,
            &format!("/invitations/{}", id),
            session.token(),
            &locale,
        )
        .await?)
}

/// POST /api/invitations/accept
pub async fn accept_invitation(
    State(ctx): State<Arc<AppContext>>,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<AcceptInvitationRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::POST,
            "/invitations/accept",
            None,
            &locale,
            &request,
        )
        .await?)
}
