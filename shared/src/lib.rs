//! Todo List Shared Library
//!
//! Wire types, domain enums and input validation shared between the
//! backend and any client of the HTTP API.

pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use models::TodoStatus;
pub use types::*;
