//! Signed bearer tokens (HS256 JWT)
//!
//! Claims carry `{ userId, email, role, iat, exp }`. The role is kept as a
//! plain string here; the auth context parses it into its own role type.

use std::time::Duration;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token lifetime ("7d")
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// 署名不正・期限切れ・形式不正のいずれも同じ扱い
    #[error("Invalid or expired token")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Token signer/verifier with an HMAC secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::default();
        // 期限ちょうどで失効させる
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a signed token for the given identity
    pub fn issue(
        &self,
        user_id: &str,
        email: Option<&str>,
        role: &str,
    ) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            user_id: user_id.to_string(),
            email: email.map(str::to_string),
            role: role.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Parse a token lifetime such as `7d`, `12h`, `30m`, `45s` or `3600`
///
/// ```rust
/// use std::time::Duration;
/// use platform::token::parse_ttl;
///
/// assert_eq!(parse_ttl("7d"), Some(Duration::from_secs(604_800)));
/// assert_eq!(parse_ttl("soon"), None);
/// ```
pub fn parse_ttl(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (number, unit) = match value.char_indices().last()? {
        (idx, c) if c.is_ascii_alphabetic() => (&value[..idx], c),
        _ => (value, 's'),
    };
    let amount: u64 = number.trim().parse().ok()?;
    let multiplier = match unit.to_ascii_lowercase() {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        'w' => 7 * 24 * 60 * 60,
        _ => return None,
    };
    amount.checked_mul(multiplier).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret", DEFAULT_TOKEN_TTL)
    }

    #[test]
    fn test_issue_and_verify() {
        let signer = signer();
        let token = signer
            .issue("5f0c…", Some("admin@5kenergia.com"), "SUPER_ADMIN")
            .unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.user_id, "5f0c…");
        assert_eq!(claims.email.as_deref(), Some("admin@5kenergia.com"));
        assert_eq!(claims.role, "SUPER_ADMIN");
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn test_claims_wire_format() {
        let claims = Claims {
            user_id: "u1".into(),
            email: None,
            role: "SELLER".into(),
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["role"], "SELLER");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = signer().issue("u1", None, "ADMIN").unwrap();
        let other = TokenSigner::new(b"other-secret", DEFAULT_TOKEN_TTL);
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer();
        let now = chrono::Utc::now().timestamp();
        let token = signer
            .sign(&Claims {
                user_id: "u1".into(),
                email: None,
                role: "SELLER".into(),
                iat: now - 120,
                exp: now - 60,
            })
            .unwrap();
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(signer().verify("not.a.token").is_err());
    }

    #[test]
    fn test_parse_ttl() {
        assert_eq!(parse_ttl("7d"), Some(Duration::from_secs(604_800)));
        assert_eq!(parse_ttl("12h"), Some(Duration::from_secs(43_200)));
        assert_eq!(parse_ttl("30m"), Some(Duration::from_secs(1_800)));
        assert_eq!(parse_ttl("3600"), Some(Duration::from_secs(3_600)));
        assert_eq!(parse_ttl(""), None);
        assert_eq!(parse_ttl("7x"), None);
        assert_eq!(parse_ttl("d"), None);
    }
}
