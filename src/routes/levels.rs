// ============================================================================
// Loyalty Level Routes
// ============================================================================
//
// Endpoints:
// - GET /api/levels - List loyalty levels
// - POST /api/levels - Create a level (admin)
// - PUT /api/levels/:id - Update a level (admin)
// - DELETE /api/levels/:id - Delete a level (admin)
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
pub struct LevelRequest {
    pub name: String,
    pub min_points: u32,
    pub discount_percent: f64,
}

/// GET /api/levels
pub async fn list_levels(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(Method::GET, "/levels", session.token(), &locale)
        .await?)
}

/// POST /api/levels
pub async fn create_level(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<LevelRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(Method::POST, "/levels", session.token(), &locale, &request)
        .await?)
}

/// PUT /api/levels/:id
pub async fn update_level(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<LevelRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::PUT,
            &format!("/levels/{}", id),
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// DELETE /api/levels/:id
pub async fn delete_level(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::DELETE,
            &format!("/levels/{}", id),
            session.token(),
            &locale,
        )
        .await?)
}
