//! Login request/response models
//!
//! Credentials, the signed-in profile, and the login form with its
//! field-scoped validation.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Credentials presented to the auth gate. Either `email` or `username`
/// identifies the account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: String,
    /// Persist the session across restarts instead of keeping it session-scoped
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub login_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Values typed into the sign-in form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Errors attached to individual form fields, plus a general banner message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<String>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.general.is_none()
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self {
            general: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Message for an empty or malformed email, `None` when it is acceptable
pub fn email_error(email: &str) -> Option<String> {
    if email.is_empty() {
        Some("Email is required".to_string())
    } else if !EMAIL_REGEX.is_match(email) {
        Some("Please enter a valid email address".to_string())
    } else {
        None
    }
}

impl LoginForm {
    /// Validate form fields before anything is sent to the auth gate
    pub fn validate(&self) -> Result<(), LoginErrors> {
        let mut errors = LoginErrors {
            email: email_error(&self.email),
            ..LoginErrors::default()
        };

        if self.password.is_empty() {
            errors.password = Some("Password is required".to_string());
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.password = Some(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: Some(self.email.clone()),
            username: None,
            password: self.password.clone(),
            remember_me: self.remember_me,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
            remember_me: false,
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form("admin@agrichain.com", "password123").validate().is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let errors = form("", "").validate().unwrap_err();
        assert_eq!(errors.email.as_deref(), Some("Email is required"));
        assert_eq!(errors.password.as_deref(), Some("Password is required"));
        assert!(errors.general.is_none());
    }

    #[test]
    fn test_malformed_email() {
        for email in ["admin", "admin@agrichain", "ad min@agrichain.com", "@agrichain.com"] {
            let errors = form(email, "password123").validate().unwrap_err();
            assert_eq!(
                errors.email.as_deref(),
                Some("Please enter a valid email address"),
                "{email} should be rejected"
            );
            assert!(errors.password.is_none());
        }
    }

    #[test]
    fn test_short_password() {
        let errors = form("admin@agrichain.com", "12345").validate().unwrap_err();
        assert!(errors.email.is_none());
        assert_eq!(
            errors.password.as_deref(),
            Some("Password must be at least 6 characters long")
        );
    }
}
