//! Session authentication for API handlers
//!
//! Each protected handler asks for a [`CurrentUser`] in its signature; the
//! extractor reads the `token` cookie, verifies it and loads the user. It is
//! read-only: the cookie is never refreshed, rotated or cleared here.

use super::cookie::session_token;
use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{extract::FromRef, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use todo_list_shared::UserSummary;
use tracing::debug;
use uuid::Uuid;

/// Authenticated caller resolved from the session cookie
///
/// Carries no password material.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

impl CurrentUser {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let token = session_token(&jar).ok_or(ApiError::Unauthenticated)?;

        let user_id = app_state.jwt().verify(token).map_err(|reason| {
            debug!(reason = reason.as_str(), "Rejected session token");
            metrics::counter!("todo_session_rejections_total", "reason" => reason.as_str())
                .increment(1);
            ApiError::InvalidToken
        })?;

        let pool = app_state.db().pool().await?;
        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| {
                debug!(%user_id, "Session token names a missing user");
                metrics::counter!("todo_session_rejections_total", "reason" => "user_not_found")
                    .increment(1);
                ApiError::UserNotFound
            })?;

        Ok(CurrentUser {
            id: user.id,
            username: user.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_summary() {
        let user = CurrentUser {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
        };
        let summary = user.summary();
        assert_eq!(summary.id, user.id);
        assert_eq!(summary.username, "alice");
    }
}
