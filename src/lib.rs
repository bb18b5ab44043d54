// ============================================================================
// journey-server
// ============================================================================
//
// Server-side front end for The Journey Adventures. Serves the static web
// shell behind a locale/auth route guard and proxies every /api call to the
// externally-owned booking backend, attaching the session token and the
// negotiated locale on the way out.
//
// ============================================================================

pub mod config;
pub mod context;
pub mod error;
pub mod gateway;
pub mod locale;
pub mod routes;
pub mod session;
pub mod utils;

pub use routes::create_router;
