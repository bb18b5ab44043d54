// ============================================================================
// Booking Routes
// ============================================================================
//
// Endpoints:
// - GET /api/bookings - List bookings (query relayed)
// - GET /api/bookings/:id - Single booking
// - POST /api/bookings - Book an adventure
// - POST /api/bookings/:id/cancel - Cancel a booking
//
// Coupon application, price math and cancellation rules live in the backend.
//
// ============================================================================

use axum::{
    extract::{Path, RawQuery, State},
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

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct CreateBookingRequest {
    pub adventure_id: String,
    pub travelers: u32,
    pub departure_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

/// GET /api/bookings
pub async fn list_bookings(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::GET,
            &with_query("/bookings", query),
            session.token(),
            &locale,
        )
        .await?)
}

/// GET /api/bookings/:id
pub async fn get_booking(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::GET,
            &format!("/bookings/{}", id),
            session.token(),
            &locale,
        )
        .await?)
}

/// POST /api/bookings
pub async fn create_booking(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::POST,
            "/bookings",
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// POST /api/bookings/:id/cancel
pub async fn cancel_booking(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::POST,
            &format!("/bookings/{}/cancel", id),
            session.token(),
            &locale,
        )
        .await?)
}
