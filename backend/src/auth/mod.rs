//! Authentication module
//!
//! Stateless JWT sessions carried in an HTTP-only cookie, argon2 password
//! hashing, the [`CurrentUser`] extractor for API handlers and the redirect
//! guard for page navigations.

mod cookie;
mod guard;
mod jwt;
mod middleware;
mod password;

pub use cookie::{clear_session_cookie, session_cookie, session_token, SESSION_COOKIE_NAME};
pub use guard::{classify, is_navigation, redirect_guard, RouteClass};
pub use jwt::{Claims, JwtKeys, JwtService, TokenError};
pub use middleware::CurrentUser;
pub use password::PasswordService;
