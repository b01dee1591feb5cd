//! Business logic services
//!
//! Services sit between the route handlers and the repositories.

pub mod todo;
pub mod user;

pub use todo::TodoService;
pub use user::{AuthOutcome, UserService};
