//! Redirect guard for browser navigation
//!
//! Runs in front of every route. Page navigations to protected prefixes
//! without a valid session are sent to the login page; navigations to the
//! login/registration pages with a valid session are sent to the landing
//! page. Only the token signature and expiry are checked, never the
//! database, so a token naming a deleted user still passes here and is
//! caught by [`CurrentUser`](super::CurrentUser).
//!
//! Programmatic API calls (no `text/html` in `Accept`, not a navigation
//! fetch) pass through untouched and get JSON 401s from the handlers.

use super::cookie::{clear_session_cookie, session_token};
use crate::config::GuardConfig;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::ACCEPT, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

/// How the guard treats a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Protected,
    Auth,
    Open,
}

/// Classify a path against the configured route sets
pub fn classify(rules: &GuardConfig, path: &str) -> RouteClass {
    if rules
        .protected_prefixes
        .iter()
        .any(|prefix| matches_prefix(path, prefix))
    {
        RouteClass::Protected
    } else if rules.auth_routes.iter().any(|route| route == path) {
        RouteClass::Auth
    } else {
        RouteClass::Open
    }
}

/// Segment-aware prefix match: `/todos` covers `/todos` and `/todos/…`
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}

/// Whether the request is a browser page navigation
pub fn is_navigation(headers: &HeaderMap) -> bool {
    let navigate = headers
        .get("sec-fetch-mode")
        .and_then(|v| v.to_str().ok())
        .map(|mode| mode.eq_ignore_ascii_case("navigate"))
        .unwrap_or(false);

    navigate
        || headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(|accept| accept.contains("text/html"))
            .unwrap_or(false)
}

/// Axum middleware implementing the redirect rules
pub async fn redirect_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if !is_navigation(request.headers()) {
        return next.run(request).await;
    }

    let rules = &state.config().guard;
    let path = request.uri().path().to_owned();
    let verdict = session_token(&jar).map(|token| state.jwt().verify(token));

    match classify(rules, &path) {
        RouteClass::Protected => match verdict {
            None => {
                debug!(%path, "No session, redirecting to login");
                Redirect::to(&rules.login_path).into_response()
            }
            Some(Ok(_)) => next.run(request).await,
            Some(Err(reason)) => {
                debug!(%path, reason = reason.as_str(), "Invalid session, clearing cookie");
                let jar = jar.add(clear_session_cookie());
                (jar, Redirect::to(&rules.login_path)).into_response()
            }
        },
        RouteClass::Auth => {
            if matches!(verdict, Some(Ok(_))) {
                debug!(%path, "Already signed in, redirecting to landing page");
                Redirect::to(&rules.landing_path).into_response()
            } else {
                next.run(request).await
            }
        }
        RouteClass::Open => next.run(request).await,
    }
}
