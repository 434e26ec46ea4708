//! Client-side field validation, performed before any network call.

use std::sync::OnceLock;

use regex::Regex;

use crate::api::RegisterRequest;
use crate::error::{AuthFlowError, Result};

const MIN_PASSWORD_LEN: usize = 3;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"(?i)^\S+@\S+$").expect("email pattern is valid"))
}

pub fn registration(request: &RegisterRequest) -> Result<()> {
    if request.name.trim().is_empty() {
        return Err(AuthFlowError::Validation("Name required".to_string()));
    }
    email(&request.email)?;
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthFlowError::Validation("Minimum 3 characters".to_string()));
    }
    if request.confirm_password != request.password {
        return Err(AuthFlowError::Validation("Passwords do not match".to_string()));
    }
    Ok(())
}

pub fn login(email_addr: &str, password: &str) -> Result<()> {
    email(email_addr)?;
    if password.is_empty() {
        return Err(AuthFlowError::Validation("Password required".to_string()));
    }
    Ok(())
}

fn email(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AuthFlowError::Validation("Email required".to_string()));
    }
    if !email_pattern().is_match(value) {
        return Err(AuthFlowError::Validation("Invalid email format".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "difference-engine".to_string(),
            confirm_password: "difference-engine".to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert!(registration(&request()).is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let mut req = request();
        req.name = "  ".to_string();
        let err = registration(&req).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Name required");
    }

    #[test]
    fn rejects_email_without_at_sign() {
        let mut req = request();
        req.email = "ada.example.com".to_string();
        let err = registration(&req).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid email format");
    }

    #[test]
    fn rejects_email_with_spaces() {
        let mut req = request();
        req.email = "ada lovelace@example.com".to_string();
        assert!(registration(&req).is_err());
    }

    #[test]
    fn rejects_short_password() {
        let mut req = request();
        req.password = "ab".to_string();
        req.confirm_password = "ab".to_string();
        let err = registration(&req).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Minimum 3 characters");
    }

    #[test]
    fn rejects_mismatched_confirmation() {
        let mut req = request();
        req.confirm_password = "other".to_string();
        let err = registration(&req).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Passwords do not match");
    }

    #[test]
    fn login_requires_password() {
        let err = login("ada@example.com", "").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Password required");
    }

    #[test]
    fn login_rejects_malformed_email() {
        assert!(login("not-an-email", "pw").is_err());
    }
}
