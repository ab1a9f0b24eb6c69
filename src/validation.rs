//! Explicit request validation. Each function returns a validation error for
//! the first violated constraint.

use crate::error::ApiError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), ApiError> {
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)?;
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ApiError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(invalid("Password cannot be empty"));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.is_empty() {
        return Err(invalid("Username cannot be empty"));
    }
    if username.len() < 3 {
        return Err(invalid("Username must be at least 3 characters"));
    }
    if username.len() > 50 {
        return Err(invalid("Username must be less than 50 characters"));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid(
            "Username can only contain letters, numbers, underscore, and hyphen",
        ));
    }
    match username.chars().next() {
        Some(first) if first.is_alphanumeric() => Ok(()),
        _ => Err(invalid("Username must start with a letter or number")),
    }
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(invalid("Email cannot be empty"));
    }
    if !email.contains('@') || !email.contains('.') {
        return Err(invalid("Invalid email format"));
    }
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(invalid("Invalid email format"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(invalid("Password must be at least 8 characters"));
    }
    Ok(())
}

fn invalid(message: &str) -> ApiError {
    ApiError::Validation(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signup_passes() {
        assert!(validate_signup("john_doe", "john@example.com", "hunter2hunter2").is_ok());
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("jo").is_err());
        assert!(validate_username("john doe").is_err());
        assert!(validate_username("-john").is_err());
        assert!(validate_username(&"a".repeat(51)).is_err());
        assert!(validate_username("john-doe_99").is_ok());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("john@").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("john@example.com").is_ok());
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_first_violation_wins() {
        let err = validate_signup("", "", "").unwrap_err();
        assert_eq!(err.message(), "Username cannot be empty");
    }
}
