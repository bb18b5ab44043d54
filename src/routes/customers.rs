// ============================================================================
// Customer Routes (admin)
// ============================================================================
//
// Endpoints:
// - GET /api/customers - List customers (query relayed)
// - GET /api/customers/:id - Single customer
// - PUT /api/customers/:id - Update a customer
// - DELETE /api/customers/:id - Delete a customer
// - POST /api/customers/:id/points - Adjust loyalty points
//
// Whether the forwarded session belongs to an admin is the backend's call;
// its 403 is relayed like any other status.
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
pub struct UpdateCustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_id: Option<String>,
}

/// Points adjustment; negative values deduct
#[derive(Debug, Deserialize, Serialize)]
pub struct AdjustPointsRequest {
    pub points: i64,
    pub reason: String,
}

/// GET /api/customers
pub async fn list_customers(
    State(ctx): State<Arc<AppContext>>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::GET,
            &with_query("/customers", query),
            session.token(),
            &locale,
        )
        .await?)
}

/// GET /api/customers/:id
pub async fn get_customer(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::GET,
            &format!("/customers/{}", id),
            session.token(),
            &locale,
        )
        .await?)
}

/// PUT /api/customers/:id
pub async fn update_customer(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::PUT,
            &format!("/customers/{}", id),
            session.token(),
            &locale,
            &request,
        )
        .await?)
}

/// DELETE /api/customers/:id
pub async fn delete_customer(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send(
            Method::DELETE,
            &format!("/customers/{}", id),
            session.token(),
            &locale,
        )
        .await?)
}

/// POST /api/customers/:id/points
pub async fn adjust_points(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    session: Session,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<AdjustPointsRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ctx
        .backend
        .send_json(
            Method::POST,
            &format!("/customers/{}/points", id),
            session.token(),
            &locale,
            &request,
        )
        .await?)
}
