//! Input validation functions
//!
//! Custom validators for todo fields and usernames, plus a helper that
//! flattens `validator` derive errors into a single user-facing message.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use validator::ValidationErrors;

/// Maximum title length in characters
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_CHARS: usize = 500;

static USERNAME_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").ok());

/// Username length bounds in characters
pub const MIN_USERNAME_CHARS: usize = 3;
pub const MAX_USERNAME_CHARS: usize = 32;

/// Validate an already-trimmed username: length and allowed characters
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    let len = username.chars().count();
    if !(MIN_USERNAME_CHARS..=MAX_USERNAME_CHARS).contains(&len) {
        return Err(format!(
            "Username must be between {} and {} characters",
            MIN_USERNAME_CHARS, MAX_USERNAME_CHARS
        ));
    }
    match USERNAME_PATTERN.as_ref() {
        Some(pattern) if pattern.is_match(username) => Ok(()),
        _ => Err("Username may only contain letters, digits, '.', '_' and '-'".to_string()),
    }
}

/// Validate an already-trimmed todo title
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(format!(
            "Title cannot be more than {} characters",
            MAX_TITLE_CHARS
        ));
    }
    Ok(())
}

/// Validate an already-trimmed todo description
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(format!(
            "Description cannot be more than {} characters",
            MAX_DESCRIPTION_CHARS
        ));
    }
    Ok(())
}

/// Flatten derive-validation errors into one message
///
/// Messages are sorted so the output is stable regardless of field order.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|err| {
            err.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value ({})", err.code))
        })
        .collect();
    messages.sort();
    messages.dedup();

    if messages.is_empty() {
        "Invalid request".to_string()
    } else {
        messages.join("; ")
    }
}
