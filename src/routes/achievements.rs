// ============================================================================
// Achievement Routes
// ============================================================================
//
// Endpoints:
// - GET /api/achievements - List achievements
// - POST /api/achievements - Create an achievement (admin)
// - PUT /api/achievements/:id - Update an achievement (admin)
// - DELETE /api/achievements/:id - Delete an achievement (admin)
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
pub struct AchievementRequest {
    pub title: String,
    pub description: String,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// GET /api/achievements
pub async fn list_achievements(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(Method::GET, "/achievements", session.token(), &locale)
        .await?)
}

/// POST /api/achievements
pub async fn create_achievement(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<AchievementRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::POST,
            "/achievements",
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// PUT /api/achievements/:id
pub async fn update_achievement(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<AchievementRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::PUT,
            &format!("/achievements/{}", id),
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// DELETE /api/achievements/:id
pub async fn delete_achievement(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::DELETE,
            &format!("/achievements/{}", id),
            session.token(),
            &locale,
        )
        .await?)
}
