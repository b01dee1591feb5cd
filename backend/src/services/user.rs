//! User service for registration and login
//!
//! Password hashing and verification run on the blocking thread pool; the
//! JWT service is passed by reference with its keys already derived.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use sqlx::PgPool;
use todo_list_shared::validation::{describe_errors, validate_username};
use todo_list_shared::{LoginRequest, RegisterRequest, UserSummary};
use tracing::info;
use validator::Validate;

/// A signed-in user together with their fresh session token
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: UserSummary,
    pub token: String,
}

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user and sign them in
    pub async fn register(
        pool: &PgPool,
        jwt_service: &JwtService,
        request: RegisterRequest,
    ) -> Result<AuthOutcome, ApiError> {
        let request = request.normalized();
        validate_username(&request.username).map_err(ApiError::Validation)?;

        // A taken username is reported whatever the password looks like
        if UserRepository::username_exists(pool, &request.username).await? {
            return Err(ApiError::UsernameTaken);
        }

        request
            .validate()
            .map_err(|e| ApiError::Validation(describe_errors(&e)))?;

        if request.password != request.confirm_password {
            return Err(ApiError::PasswordMismatch);
        }

        let password_hash = PasswordService::hash_async(request.password).await?;

        // Two concurrent registrations can both pass the existence check;
        // the unique index decides.
        let user = UserRepository::create(pool, &request.username, &password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::UsernameTaken
                } else {
                    ApiError::Internal(e)
                }
            })?;

        let token = jwt_service.issue(user.id)?;

        metrics::counter!("todo_registrations_total").increment(1);
        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(AuthOutcome {
            user: UserSummary {
                id: user.id,
                username: user.username,
            },
            token,
        })
    }

    /// Login with username and password
    ///
    /// Unknown usernames and wrong passwords produce the same error and
    /// cost the same hashing work.
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        request: LoginRequest,
    ) -> Result<AuthOutcome, ApiError> {
        let username = request.username.trim();

        let Some(user) = UserRepository::find_by_username(pool, username).await? else {
            PasswordService::verify_unknown_user(request.password).await;
            metrics::counter!("todo_logins_total", "outcome" => "failure").increment(1);
            return Err(ApiError::InvalidCredentials);
        };

        let valid = PasswordService::verify_async(request.password, user.password_hash).await?;
        if !valid {
            metrics::counter!("todo_logins_total", "outcome" => "failure").increment(1);
            return Err(ApiError::InvalidCredentials);
        }

        let token = jwt_service.issue(user.id)?;

        metrics::counter!("todo_logins_total", "outcome" => "success").increment(1);
        info!(user_id = %user.id, "User logged in");

        Ok(AuthOutcome {
            user: UserSummary {
                id: user.id,
                username: user.username,
            },
            token,
        })
    }
}

fn is_unique_violation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}
