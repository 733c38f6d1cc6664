//! Shared helpers.

use std::path::{Component, Path};

use crate::error::{FnStampError, Result};

/// Validates a function name so the derived file path cannot escape the
/// functions directory.
///
/// # Examples
///
/// ```
/// use fnstamp::utils::validate_function_name;
///
/// assert!(validate_function_name("send-sms").is_ok());
/// assert!(validate_function_name("../etc/passwd").is_err());
/// ```
pub fn validate_function_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| FnStampError::InvalidFunctionName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains('\0') {
        return Err(invalid("name contains a NUL byte"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name contains a path separator"));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid("name is not a plain file name")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_function_name("hello-world").is_ok());
        assert!(validate_function_name("sms_reply.v2").is_ok());
    }

    #[test]
    fn test_rejects_traversal_and_separators() {
        for name in ["", "  ", "..", ".", "a/b", "a\\b", "../x", "nul\0"] {
            let result = validate_function_name(name);
            assert!(
                matches!(result, Err(FnStampError::InvalidFunctionName { .. })),
                "expected {name:?} to be rejected"
            );
        }
    }
}
