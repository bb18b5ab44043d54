// ============================================================================
// Consultation Routes
// ============================================================================
//
// Endpoints:
// - POST /api/consultations - Request a consultation (public form)
// - GET /api/consultations - List requests (admin)
// - PUT /api/consultations/:id - Update a request's status (admin)
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
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct CreateConsultationRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub preferred_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateConsultationRequest {
    pub status: String,
}

/// POST /api/consultations
/// Public; reachable without a session, though one is forwarded when present
pub async fn create_consultation(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<CreateConsultationRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::POST,
            "/consultations",
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// GET /api/consultations
pub async fn list_consultations(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(Method::GET, "/consultations", session.token(), &locale)
        .await?)
}

/// PUT /api/consultations/:id
pub async fn update_consultation(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<UpdateConsultationRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::PUT,
            &format!("/consultations/{}", id),
            session.token(),
            &locale,
            &request,
        )
        .await?)
}
