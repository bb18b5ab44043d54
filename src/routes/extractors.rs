// ============================================================================
// Axum Extractors
// ============================================================================
//
// Custom extractors for Axum routes:
// - Session: the backend session token from the authToken cookie, if any
// - ClientLocale: locale negotiated from Accept-Language for /api calls
//
// Both are non-rejecting. Whether a missing token matters is the backend's
// call: proxy handlers forward whatever is present and relay the backend's
// 401 verbatim.
//
// ============================================================================

use std::convert::Infallible;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::context::AppContext;
use crate::locale::Locale;
use crate::session;

/// Extractor for the session token stored in the session cookie
///
/// Usage:
/// ```rust,ignore
/// async fn handler(session: Session, ...) -> Result<...> {
///     let response = ctx.backend.send(Method::GET, "/user", session.token(), &locale).await?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session(pub Option<String>);

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppContext>> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Session(session::extract_token(
            &parts.headers,
            &state.config.cookie.name,
        )))
    }
}

/// Extractor for the request locale on /api routes.
///
/// Page requests carry the locale in the path; API calls do not, so it is
/// negotiated from the Accept-Language header against the supported set.
#[derive(Debug, Clone)]
pub struct ClientLocale(pub Locale);

#[async_trait]
impl FromRequestParts<Arc<AppContext>> for ClientLocale {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let accept_language = parts
            .headers
            .get("accept-language")
            .and_then(|v| v.to_str().ok());

        Ok(ClientLocale(state.locales.negotiate(accept_language)))
    }
}
