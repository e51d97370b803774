//! Field validation rules for user-supplied values.

use crate::error::CoreError;

/// Minimum username length in characters.
pub const USERNAME_MIN_LEN: usize = 3;
/// Maximum username length in characters.
pub const USERNAME_MAX_LEN: usize = 20;
/// Maximum dashboard description length in characters.
pub const DESCRIPTION_MAX_LEN: usize = 100;

/// Validate a username: 3-20 characters, no whitespace.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if len < USERNAME_MIN_LEN || len > USERNAME_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "Username must not contain whitespace".into(),
        ));
    }
    Ok(())
}

/// Validate that a required name field is non-empty after trimming.
pub fn validate_required_name(name: &str, field: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate an optional dashboard description against the length limit.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Description must be at most {DESCRIPTION_MAX_LEN} characters"
        )));
    }
    Ok(())
}
