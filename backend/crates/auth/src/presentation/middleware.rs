//! Auth Middleware
//!
//! Bearer-token guards for protected routes. A successful check stores
//! [`CurrentPerson`] in the request extensions for downstream handlers.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::{HeaderMap, Request, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::PersonId;

use crate::application::config::AuthConfig;
use crate::domain::value_object::person_role::PersonRole;
use crate::error::{AuthError, AuthResult};

/// Middleware state: only the token verifier is needed
#[derive(Clone)]
pub struct AuthGuard {
    config: Arc<AuthConfig>,
}

impl AuthGuard {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// `Authorization: Bearer <jwt>` を検証して呼び出し元を特定する
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthResult<CurrentPerson> {
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingBearer)?;
        let value = value.to_str().map_err(|_| AuthError::MalformedBearer)?;

        let token = match value.split(' ').collect::<Vec<_>>().as_slice() {
            ["Bearer", token] if !token.is_empty() => *token,
            _ => return Err(AuthError::MalformedBearer),
        };

        let claims = self.config.tokens.verify(token)?;
        let id = PersonId::parse(&claims.user_id).ok_or(AuthError::InvalidBearer)?;

        Ok(CurrentPerson {
            id,
            email: claims.email,
            // 不明なロールは最も権限の低い SELLER として扱う
            role: PersonRole::from_code(&claims.role).unwrap_or_default(),
        })
    }
}

/// Authenticated caller, decoded from the bearer token
#[derive(Debug, Clone)]
pub struct CurrentPerson {
    pub id: PersonId,
    pub email: Option<String>,
    pub role: PersonRole,
}

impl<S> FromRequestParts<S> for CurrentPerson
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentPerson>()
            .cloned()
            .ok_or(AuthError::MissingBearer)
    }
}

/// Any valid bearer token
pub async fn require_auth(
    State(guard): State<AuthGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let person = guard.authenticate(req.headers())?;
    req.extensions_mut().insert(person);
    Ok(next.run(req).await)
}

/// ADMIN or SUPER_ADMIN
pub async fn require_admin(
    State(guard): State<AuthGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let person = guard.authenticate(req.headers())?;
    if !person.role.is_admin_or_higher() {
        return Err(AuthError::Forbidden(
            "Apenas administradores podem acessar este recurso.",
        ));
    }
    req.extensions_mut().insert(person);
    Ok(next.run(req).await)
}

/// SELLER tokens only
pub async fn require_seller(
    State(guard): State<AuthGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let person = guard.authenticate(req.headers())?;
    if person.role != PersonRole::Seller {
        return Err(AuthError::Forbidden(
            "Apenas vendedores podem acessar este recurso.",
        ));
    }
    req.extensions_mut().insert(person);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::time::Duration;

    fn guard() -> AuthGuard {
        AuthGuard::new(Arc::new(AuthConfig::new(b"middleware-test", Duration::from_secs(60))))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header() {
        let err = guard().authenticate(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, AuthError::MissingBearer));
        assert_eq!(err.to_string(), "Token não fornecido");
    }

    #[test]
    fn test_malformed_header() {
        for value in ["Token abc", "Bearer", "Bearer a b", "bearer abc"] {
            let err = guard().authenticate(&headers_with(value)).unwrap_err();
            assert!(matches!(err, AuthError::MalformedBearer), "{value}");
        }
    }

    #[test]
    fn test_invalid_signature() {
        let err = guard()
            .authenticate(&headers_with("Bearer not.a.jwt"))
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidBearer));
        assert_eq!(err.to_string(), "Token inválido ou expirado");
    }

    #[test]
    fn test_valid_token_decodes_role() {
        let guard = guard();
        let id = PersonId::new();
        let token = guard
            .config
            .tokens
            .issue(&id.to_string(), Some("a@x.com"), "ADMIN")
            .unwrap();

        let person = guard
            .authenticate(&headers_with(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(person.id, id);
        assert_eq!(person.role, PersonRole::Admin);
        assert_eq!(person.email.as_deref(), Some("a@x.com"));
    }
}
