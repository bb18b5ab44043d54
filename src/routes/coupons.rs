// ============================================================================
// Coupon Routes
// ============================================================================
//
// Endpoints:
// - GET /api/coupons - List coupons (admin)
// - POST /api/coupons - Create a coupon (admin)
// - PUT /api/coupons/:id - Update a coupon (admin)
// - DELETE /api/coupons/:id - Delete a coupon (admin)
// - POST /api/coupons/validate - Check a code during checkout
//
// A coupon is either a fixed amount (value) or a percentage (percentOff);
// whichever the admin form leaves blank must stay absent from the backend
// payload, never null-filled, or the backend rejects the mixed shape.
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

/// Create/update payload; PUT sends the same shape
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct CouponRequest {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_off: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidateCouponRequest {
    pub code: String,
}

/// GET /api/coupons
pub async fn list_coupons(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(Method::GET, "/coupons", session.token(), &locale)
        .await?)
}

/// POST /api/coupons
pub async fn create_coupon(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<CouponRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(Method::POST, "/coupons", session.token(), &locale, &request)
        .await?)
}

/// PUT /api/coupons/:id
pub async fn update_coupon(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<CouponRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::PUT,
            &format!("/coupons/{}", id),
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// DELETE /api/coupons/:id
pub async fn delete_coupon(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::DELETE,
            &format!("/coupons/{}", id),
            session.token(),
            &locale,
        )
        .await?)
}

/// POST /api/coupons/validate
pub async fn validate_coupon(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<ValidateCouponRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::POST,
            "/coupons/validate",
            session.token(),
            &locale,
            &request,
        )
        .await?)
}
