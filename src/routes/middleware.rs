// ============================================================================
// Axum Middleware
// ============================================================================
//
// Middleware for request processing:
// - request_logging: log all incoming requests
// - route_guard: authentication / verification / locale gate for page requests
//
// The guard runs as an explicit pipeline of named steps, each returning a
// decision instead of mutating shared state:
//   1. resolve_locale  (positional /{locale}/{rest} split, via Locales)
//   2. check_session   (no cookie -> sign-in page)
//   3. check_verification (profile fetch -> verify-email page or cookie clear)
//   4. route_locale    (default-locale redirect / unsupported segment 404)
//
// /api, /assets and /health traffic is not page navigation and bypasses the
// guard entirely.
//
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::gateway::{BackendResponse, Envelope};
use crate::locale::{Locale, Locales};
use crate::session;
use crate::utils::{encode_query_value, log_safe_id};

/// Path prefix of the sign-in and verification pages; always passes the guard
const AUTH_PAGE_PREFIX: &str = "/authentication";

/// Prefixes that are not page navigations and bypass the guard
const GUARD_SKIP_PREFIXES: &[&str] = &["/api/", "/assets/", "/health"];

/// Minimal profile shape used to pick redirect targets
#[derive(Debug, Deserialize)]
struct ProfileSummary {
    email: String,
    #[serde(default)]
    verified: bool,
}

/// Outcome of a pipeline step
#[derive(Debug, PartialEq)]
pub(crate) enum GuardDecision {
    Continue,
    Redirect(String),
    NotFound,
}

/// Outcome of the verification step
#[derive(Debug, PartialEq)]
pub(crate) enum VerificationDecision {
    Continue,
    Redirect(String),
    /// Session no longer valid: clear the cookie, let the request proceed
    ClearAndContinue,
}

/// Classified result of the per-request profile fetch
#[derive(Debug, PartialEq)]
pub(crate) enum ProfileOutcome {
    Verified,
    Unverified { email: String },
    Invalid,
}

/// Request logging middleware
pub async fn request_logging(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    tracing::debug!(
        method = %method,
        path = %path,
        "Incoming request"
    );

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Route protection middleware for page requests.
///
/// Per-request state machine:
/// - no session cookie: rewrite to the locale-scoped sign-in page
/// - session + unverified profile: rewrite to the verify-email page,
///   carrying the account email as a query parameter
/// - session + verified profile: pass through
/// - session the backend rejects: clear the cookie, request proceeds
///
/// The sign-in pages themselves always pass unchecked so the redirect can
/// never loop. The profile check runs on every protected navigation; the
/// verification status is always fresh.
pub async fn route_guard(
    State(ctx): State<Arc<AppContext>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    if is_guard_exempt(&path) {
        return next.run(req).await;
    }

    // 1. Resolve the locale positionally from the path
    let resolved = ctx.locales.resolve_path(&path);
    let locale = resolved.locale.clone();
    let page_path = resolved.page_path.to_string();

    let token = session::extract_token(req.headers(), &ctx.config.cookie.name);

    // 2. Session gate
    if let GuardDecision::Redirect(target) = check_session(&page_path, &locale, token.is_some()) {
        return Redirect::temporary(&target).into_response();
    }

    // 3. Verification gate; only with a session, never on the sign-in pages
    let mut clear_session = false;
    if let Some(token) = token.as_deref() {
        if !page_path.starts_with(AUTH_PAGE_PREFIX) {
            let outcome = fetch_profile(&ctx, token, &locale).await;
            match check_verification(&outcome, &locale) {
                VerificationDecision::Continue => {}
                VerificationDecision::Redirect(target) => {
                    return Redirect::temporary(&target).into_response();
                }
                VerificationDecision::ClearAndContinue => clear_session = true,
            }
        }
    }

    // 4. Locale-prefix routing
    let mut response = match route_locale(&path, &ctx.locales) {
        GuardDecision::Continue => next.run(req).await,
        GuardDecision::Redirect(target) => Redirect::temporary(&target).into_response(),
        GuardDecision::NotFound => StatusCode::NOT_FOUND.into_response(),
    };

    if clear_session {
        match session::build_delete_cookie(&ctx.config.cookie) {
            Ok(cookie) => {
                response.headers_mut().insert(SET_COOKIE, cookie);
            }
            Err(e) => e.log(),
        }
    }

    response
}

// ============================================================================
// Pipeline steps
// ============================================================================

/// Step 2: without a session cookie, every page except the sign-in pages
/// redirects to the locale-scoped sign-in page
pub(crate) fn check_session(page_path: &str, locale: &Locale, has_token: bool) -> GuardDecision {
    if page_path.starts_with(AUTH_PAGE_PREFIX) {
        return GuardDecision::Continue;
    }

    if !has_token {
        return GuardDecision::Redirect(format!("/{}{}", locale, AUTH_PAGE_PREFIX));
    }

    GuardDecision::Continue
}

/// Step 3: route the request based on the fetched verification status
pub(crate) fn check_verification(
    outcome: &ProfileOutcome,
    locale: &Locale,
) -> VerificationDecision {
    match outcome {
        ProfileOutcome::Verified => VerificationDecision::Continue,
        ProfileOutcome::Unverified { email } => VerificationDecision::Redirect(format!(
            "/{}{}/verify-email?email={}",
            locale,
            AUTH_PAGE_PREFIX,
            encode_query_value(email)
        )),
        ProfileOutcome::Invalid => VerificationDecision::ClearAndContinue,
    }
}

/// Step 4: locale-prefix routing. The bare root goes to the default locale;
/// paths without a supported locale segment are not found.
pub(crate) fn route_locale(path: &str, locales: &Locales) -> GuardDecision {
    if path == "/" {
        return GuardDecision::Redirect(format!("/{}", locales.default_locale()));
    }

    if locales.resolve_path(path).from_path {
        GuardDecision::Continue
    } else {
        GuardDecision::NotFound
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn is_guard_exempt(path: &str) -> bool {
    path == "/favicon.ico" || GUARD_SKIP_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Fetch the caller's profile through the gateway and classify the reply
async fn fetch_profile(ctx: &AppContext, token: &str, locale: &Locale) -> ProfileOutcome {
    let response = ctx
        .backend
        .send(Method::GET, "/user", Some(token), locale)
        .await;
    classify_profile(ctx, response)
}

fn classify_profile(ctx: &AppContext, response: AppResult<BackendResponse>) -> ProfileOutcome {
    let response = match response {
        Ok(response) => response,
        Err(e) => {
            // Request could not even be built (malformed token bytes)
            tracing::warn!(error = %e, "Profile fetch failed; treating session as invalid");
            return ProfileOutcome::Invalid;
        }
    };

    if !response.is_success() {
        tracing::debug!(
            status = %response.status.as_u16(),
            "Profile fetch rejected; treating session as invalid"
        );
        return ProfileOutcome::Invalid;
    }

    match response.json::<Envelope<ProfileSummary>>() {
        Ok(Envelope {
            data: Some(profile),
            ..
        }) => {
            if profile.verified {
                ProfileOutcome::Verified
            } else {
                tracing::debug!(
                    email_hash = %log_safe_id(&profile.email, &ctx.config.log_salt),
                    "Account pending email verification"
                );
                ProfileOutcome::Unverified {
                    email: profile.email,
                }
            }
        }
        _ => {
            tracing::warn!("Profile response missing profile data; treating session as invalid");
            ProfileOutcome::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use bytes::Bytes;

    fn locales() -> Locales {
        Locales::new(vec!["en".to_string(), "ka".to_string()], "en".to_string())
    }

    fn locale(code: &str) -> Locale {
        locales().negotiate(Some(code))
    }

    fn test_context() -> AppContext {
        let config = crate::config::Config {
            api_base_url: "http://backend.test".to_string(),
            image_base_url: String::new(),
            port: 0,
            default_locale: "en".to_string(),
            supported_locales: vec!["en".to_string(), "ka".to_string()],
            cookie: crate::config::CookieConfig {
                name: "authToken".to_string(),
                ttl_days: 30,
                secure: false,
            },
            backend_timeout_secs: 5,
            static_dir: "./static".to_string(),
            log_salt: "test-salt".to_string(),
            rust_log: "info".to_string(),
        };
        AppContext::new(Arc::new(config)).unwrap()
    }

    fn profile_response(status: StatusCode, body: &'static [u8]) -> AppResult<BackendResponse> {
        Ok(BackendResponse {
            status,
            content_type: Some(HeaderValue::from_static("application/json")),
            body: Bytes::from_static(body),
        })
    }

    // ===== check_session =====

    #[test]
    fn missing_cookie_redirects_to_sign_in() {
        let decision = check_session("/admin/coupons", &locale("ka"), false);
        assert_eq!(
            decision,
            GuardDecision::Redirect("/ka/authentication".to_string())
        );
    }

    #[test]
    fn sign_in_pages_pass_without_cookie() {
        assert_eq!(
            check_session("/authentication", &locale("en"), false),
            GuardDecision::Continue
        );
        assert_eq!(
            check_session("/authentication/verify-email", &locale("en"), false),
            GuardDecision::Continue
        );
    }

    #[test]
    fn cookie_holder_passes_session_gate() {
        assert_eq!(
            check_session("/adventures/42", &locale("en"), true),
            GuardDecision::Continue
        );
    }

    // ===== check_verification =====

    #[test]
    fn verified_profile_continues() {
        assert_eq!(
            check_verification(&ProfileOutcome::Verified, &locale("en")),
            VerificationDecision::Continue
        );
    }

    #[test]
    fn unverified_profile_redirects_with_encoded_email() {
        let outcome = ProfileOutcome::Unverified {
            email: "traveler@example.com".to_string(),
        };
        assert_eq!(
            check_verification(&outcome, &locale("en")),
            VerificationDecision::Redirect(
                "/en/authentication/verify-email?email=traveler%40example.com".to_string()
            )
        );
    }

    #[test]
    fn invalid_session_clears_and_continues() {
        assert_eq!(
            check_verification(&ProfileOutcome::Invalid, &locale("en")),
            VerificationDecision::ClearAndContinue
        );
    }

    // ===== route_locale =====

    #[test]
    fn root_redirects_to_default_locale() {
        assert_eq!(
            route_locale("/", &locales()),
            GuardDecision::Redirect("/en".to_string())
        );
    }

    #[test]
    fn supported_locale_paths_pass() {
        assert_eq!(route_locale("/en", &locales()), GuardDecision::Continue);
        assert_eq!(
            route_locale("/ka/adventures", &locales()),
            GuardDecision::Continue
        );
    }

    #[test]
    fn unsupported_segments_are_not_found() {
        assert_eq!(
            route_locale("/fr/adventures", &locales()),
            GuardDecision::NotFound
        );
        assert_eq!(route_locale("/robots.txt", &locales()), GuardDecision::NotFound);
    }

    // ===== classify_profile =====

    #[test]
    fn classifies_verified_profile() {
        let ctx = test_context();
        let response = profile_response(
            StatusCode::OK,
            b"{\"data\":{\"email\":\"a@b.c\",\"verified\":true}}",
        );
        assert_eq!(classify_profile(&ctx, response), ProfileOutcome::Verified);
    }

    #[test]
    fn classifies_unverified_profile_with_email() {
        let ctx = test_context();
        let response = profile_response(
            StatusCode::OK,
            b"{\"data\":{\"email\":\"a@b.c\",\"verified\":false}}",
        );
        assert_eq!(
            classify_profile(&ctx, response),
            ProfileOutcome::Unverified {
                email: "a@b.c".to_string()
            }
        );
    }

    #[test]
    fn missing_verified_field_reads_as_unverified() {
        let ctx = test_context();
        let response = profile_response(StatusCode::OK, b"{\"data\":{\"email\":\"a@b.c\"}}");
        assert_eq!(
            classify_profile(&ctx, response),
            ProfileOutcome::Unverified {
                email: "a@b.c".to_string()
            }
        );
    }

    #[test]
    fn non_success_status_is_invalid() {
        let ctx = test_context();
        let response = profile_response(StatusCode::UNAUTHORIZED, b"{\"message\":\"expired\"}");
        assert_eq!(classify_profile(&ctx, response), ProfileOutcome::Invalid);
    }

    #[test]
    fn undecodable_success_body_is_invalid() {
        let ctx = test_context();
        let response = profile_response(StatusCode::OK, b"<html>not json</html>");
        assert_eq!(classify_profile(&ctx, response), ProfileOutcome::Invalid);
    }

    // ===== guard exemptions =====

    #[test]
    fn api_assets_and_health_bypass_the_guard() {
        assert!(is_guard_exempt("/api/coupons"));
        assert!(is_guard_exempt("/assets/app.js"));
        assert!(is_guard_exempt("/health"));
        assert!(is_guard_exempt("/favicon.ico"));
        assert!(!is_guard_exempt("/en/adventures"));
    }
}
