//! Email Value Object
//!
//! Represents a normalized (trimmed, lowercased) email address.
//! Ownership is proven later through the verification link.

use kernel::error::app_error::{AppError, AppResult};
use kernel::validation;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// 正規化してから形式を検証する
    pub fn new(email: impl AsRef<str>) -> AppResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        validation::required(Some(email.as_str()), "Email")?;
        validation::email(&email)?;
        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request("Email inválido"));
        }

        Ok(Self(email))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("seller@example.com").is_ok());
        assert!(Email::new("user.name@5kenergia.com.br").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert_eq!(Email::new("").unwrap_err().message(), "Email é obrigatório");
        assert_eq!(Email::new("a@b").unwrap_err().message(), "Email inválido");
        assert!(Email::new("user@@example.com").is_err());
        assert!(Email::new("us er@example.com").is_err());
    }

    #[test]
    fn test_email_normalization() {
        let email = Email::new("  Maria@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "maria@example.com");
    }
}
