// ============================================================================
// Adventure Routes
// ============================================================================
//
// Endpoints:
// - GET /api/adventures - List adventures (page/search/category relayed)
// - GET /api/adventures/:id - Single adventure
// - POST /api/adventures - Create (admin)
// - PUT /api/adventures/:id - Update (admin)
// - DELETE /api/adventures/:id - Delete (admin)
// - POST /api/adventures/:id/image - Upload the cover image (admin, multipart)
//
// ============================================================================

use axum::{
    extract::{Multipart, Path, RawQuery, State},
    http::Method,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::extractors::{ClientLocale, Session};
use crate::routes::with_query;

/// Create/update payload; PUT sends the full shape like POST does
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct AdventureRequest {
    pub title: String,
    pub description: String,
    pub base_price: f64,
    pub duration_days: u32,
    pub max_travelers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// GET /api/adventures
pub async fn list_adventures(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::GET,
            &with_query("/adventures", query),
            session.token(),
            &locale,
        )
        .await?)
}

/// GET /api/adventures/:id
pub async fn get_adventure(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::GET,
            &format!("/adventures/{}", id),
            session.token(),
            &locale,
        )
        .await?)
}

/// POST /api/adventures
pub async fn create_adventure(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<AdventureRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::POST,
            "/adventures",
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// PUT /api/adventures/:id
pub async fn update_adventure(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<AdventureRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::PUT,
            &format!("/adventures/{}", id),
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// DELETE /api/adventures/:id
pub async fn delete_adventure(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::DELETE,
            &format!("/adventures/{}", id),
            session.token(),
            &locale,
        )
        .await?)
}

/// POST /api/adventures/:id/image
/// Rebuilds the browser's multipart form part by part and forwards it; the
/// backend stores the image and returns its CDN path
pub async fn upload_adventure_image(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = reqwest::multipart::Form::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("file").to_string();
        let file_name = field.file_name().map(|f| f.to_string());
        let content_type = field.content_type().map(|c| c.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("failed to read upload: {}", e)))?;

        let mut part = reqwest::multipart::Part::bytes(data.to_vec());
        if let Some(file_name) = file_name {
            part = part.file_name(file_name);
        }
        if let Some(content_type) = content_type {
            part = part.mime_str(&content_type)?;
        }
        form = form.part(name, part);
    }

    Ok(ctx
        .backend
        .send_multipart(
            Method::POST,
            &format!("/adventures/{}/image", id),
            session.token(),
            &locale,
            form,
        )
        .await?)
}
