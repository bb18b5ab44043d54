// ============================================================================
// Axum Routes Module
// ============================================================================
//
// Everything the server answers is assembled here:
// - /health, /health/ready: operational probes, outside the guarded stack
// - /api/...: proxy routes relaying JSON (and one multipart upload) to the
//   booking backend
// - everything else: the static web shell, gated by route_guard
//
// Structure:
// - mod.rs: Router assembly and middleware layering
// - middleware.rs: Request logging, route protection pipeline
// - extractors.rs: Session cookie and Accept-Language extractors
// - health.rs: Liveness and readiness probes
// - auth.rs: Sign-in flows and the session cookie lifecycle
// - remaining files: one per backend resource, proxy handlers only
//
// ============================================================================

mod achievements;
mod adventures;
mod auth;
mod bookings;
mod config_info;
mod consultations;
mod coupons;
mod customers;
mod extractors;
mod health;
mod invitations;
mod levels;
mod middleware;
mod profile;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;

/// Create the main application router with all routes
pub fn create_router(app_context: Arc<AppContext>) -> Router {
    let static_dir = &app_context.config.static_dir;
    // Single-page shell: any locale-prefixed path the guard lets through
    // serves index.html; real files (assets, favicon) win when they exist
    let shell = ServeDir::new(static_dir)
        .fallback(ServeFile::new(format!("{}/index.html", static_dir)));

    let api = Router::new()
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/verify-otp", post(auth::verify_otp))
        .route("/auth/resend-otp", post(auth::resend_otp))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/auth/logout", post(auth::logout))
        // Account profile
        .route(
            "/profile",
            get(profile::get_profile).patch(profile::update_profile),
        )
        .route("/profile/email", put(profile::change_email))
        .route("/profile/password", put(profile::change_password))
        // Adventures
        .route(
            "/adventures",
            get(adventures::list_adventures).post(adventures::create_adventure),
        )
        .route(
            "/adventures/:id",
            get(adventures::get_adventure)
                .put(adventures::update_adventure)
                .delete(adventures::delete_adventure),
        )
        .route(
            "/adventures/:id/image",
            post(adventures::upload_adventure_image),
        )
        // Bookings
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id/cancel", post(bookings::cancel_booking))
        // Consultations
        .route(
            "/consultations",
            get(consultations::list_consultations).post(consultations::create_consultation),
        )
        .route("/consultations/:id", put(consultations::update_consultation))
        // Coupons
        .route(
            "/coupons",
            get(coupons::list_coupons).post(coupons::create_coupon),
        )
        .route(
            "/coupons/:id",
            put(coupons::update_coupon).delete(coupons::delete_coupon),
        )
        .route("/coupons/validate", post(coupons::validate_coupon))
        // Loyalty levels
        .route("/levels", get(levels::list_levels).post(levels::create_level))
        .route(
            "/levels/:id",
            put(levels::update_level).delete(levels::delete_level),
        )
        // Achievements
        .route(
            "/achievements",
            get(achievements::list_achievements).post(achievements::create_achievement),
        )
        .route(
            "/achievements/:id",
            put(achievements::update_achievement).delete(achievements::delete_achievement),
        )
        // Customers (admin)
        .route("/customers", get(customers::list_customers))
        .route(
            "/customers/:id",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route("/customers/:id/points", post(customers::adjust_points))
        // Admin invitations
        .route(
            "/invitations",
            get(invitations::list_invitations).post(invitations::create_invitation),
        )
        .route("/invitations/:id", axum::routing::delete(invitations::delete_invitation))
        .route("/invitations/accept", post(invitations::accept_invitation))
        // Shell configuration
        .route("/config", get(config_info::shell_config));

    Router::new()
        // Operational probes (bypass the route guard via its skip list)
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        // Backend proxies
        .nest("/api", api)
        // Everything else is a page request for the shell
        .fallback_service(shell)
        // Apply middleware (order matters - last added runs first)
        .layer(
            ServiceBuilder::new()
                // Tracing layer (outermost - runs first)
                .layer(TraceLayer::new_for_http())
                // Request logging
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .into_inner(),
        )
        // Route protection (needs state, applied separately)
        .layer(axum::middleware::from_fn_with_state(
            app_context.clone(),
            middleware::route_guard,
        ))
        .with_state(app_context)
}

/// Append a relayed query string to a backend path
pub(crate) fn with_query(path: &str, query: Option<String>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_string(),
    }
}
