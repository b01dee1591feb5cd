//! Authentication routes
//!
//! Registration and login set the session cookie; logout overwrites it with
//! an expired one. Password work runs on the blocking thread pool.

use crate::auth::{clear_session_cookie, session_cookie, CurrentUser};
use crate::error::{ApiJson, ApiResult};
use crate::services::{AuthOutcome, UserService};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use todo_list_shared::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Attach the session cookie for a fresh sign-in
fn sign_in(
    state: &AppState,
    jar: CookieJar,
    outcome: AuthOutcome,
    message: &str,
) -> (CookieJar, Json<AuthResponse>) {
    let cookie = session_cookie(
        outcome.token,
        state.jwt().ttl_secs(),
        state.config().cookie_secure(),
    );
    let body = AuthResponse {
        success: true,
        message: Some(message.to_string()),
        user: outcome.user,
    };
    (jar.add(cookie), Json(body))
}

/// Register a new user
///
/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let pool = state.db().pool().await?;
    let outcome = UserService::register(pool, state.jwt(), req).await?;
    let (jar, body) = sign_in(&state, jar, outcome, "User registered successfully");
    Ok((StatusCode::CREATED, jar, body))
}

/// Login with username and password
///
/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let pool = state.db().pool().await?;
    let outcome = UserService::login(pool, state.jwt(), req).await?;
    Ok(sign_in(&state, jar, outcome, "Login successful"))
}

/// Clear the session cookie
///
/// POST /auth/logout
///
/// Tokens are stateless: a copy of the old token stays valid until expiry.
async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.add(clear_session_cookie()),
        Json(MessageResponse::ok("Logged out successfully")),
    )
}

/// Get the signed-in user
///
/// GET /auth/me
async fn me(user: CurrentUser) -> Json<AuthResponse> {
    Json(AuthResponse {
        success: true,
        message: None,
        user: user.summary(),
    })
}

/// Sample protected resource
///
/// GET /protected
pub async fn protected_data(user: CurrentUser) -> Json<AuthResponse> {
    Json(AuthResponse {
        success: true,
        message: Some("This is protected data".to_string()),
        user: user.summary(),
    })
}
