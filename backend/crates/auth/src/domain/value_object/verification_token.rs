//! Verification Token Value Object
//!
//! Single-use token shared by email verification and password reset.
//! A token is valid while `expires_at >= now`.

use chrono::{DateTime, Duration, Utc};

/// トークンの用途（有効期限が異なる）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    /// 24 hours
    EmailVerification,
    /// 1 hour
    PasswordReset,
}

impl TokenPurpose {
    pub fn ttl(&self) -> Duration {
        match self {
            TokenPurpose::EmailVerification => Duration::hours(24),
            TokenPurpose::PasswordReset => Duration::hours(1),
        }
    }
}

/// Random bytes per token (hex-encoded to 64 characters)
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl VerificationToken {
    pub fn generate(purpose: TokenPurpose, now: DateTime<Utc>) -> Self {
        Self {
            value: platform::crypto::random_hex_token(TOKEN_BYTES),
            expires_at: now + purpose.ttl(),
        }
    }

    pub fn from_db(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// 期限ちょうどの時刻はまだ有効
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at >= now
    }

    /// 期限内かつ値が一致する場合のみ true
    pub fn matches(&self, candidate: &str, now: DateTime<Utc>) -> bool {
        self.value == candidate && self.is_valid_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let now = Utc::now();
        let token = VerificationToken::generate(TokenPurpose::EmailVerification, now);
        assert_eq!(token.as_str().len(), 64);
        assert_eq!(token.expires_at(), now + Duration::hours(24));

        let reset = VerificationToken::generate(TokenPurpose::PasswordReset, now);
        assert_eq!(reset.expires_at(), now + Duration::hours(1));
        assert_ne!(reset.as_str(), token.as_str());
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let token = VerificationToken::from_db("abc", now);
        assert!(token.matches("abc", now));
        assert!(!token.matches("abc", now + Duration::milliseconds(1)));
        assert!(!token.matches("abd", now));
    }
}
