//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::token::TokenSigner;

use crate::domain::entity::person::Person;
use crate::domain::value_object::person_role::PersonRole;
use crate::error::AuthResult;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Bearer token signer (HS256)
    pub tokens: TokenSigner,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            tokens: TokenSigner::new(jwt_secret, token_ttl),
            password_pepper: None,
        }
    }

    /// Create config with a random signing secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret(token_ttl: Duration) -> Self {
        let secret = platform::crypto::random_bytes(32);
        Self::new(&secret, token_ttl)
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.password_pepper = Some(pepper.into());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Issue a bearer token for `person` with the given role claim
    pub fn issue_token(&self, person: &Person, role: PersonRole) -> AuthResult<String> {
        Ok(self
            .tokens
            .issue(&person.id.to_string(), person.email_str(), role.code())?)
    }
}
