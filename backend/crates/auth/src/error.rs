//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email, wrong password, missing hash or (admin path) inactive account
    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Conta desativada")]
    AccountDisabled,

    #[error("Email não verificado. Verifique seu email antes de fazer login.")]
    EmailNotVerified,

    #[error("Senha não definida. Complete o cadastro através do link enviado por email.")]
    PasswordNotSet,

    /// Verification / reset token unknown or expired
    #[error("Token inválido ou expirado")]
    InvalidVerificationToken,

    #[error("Email já cadastrado")]
    EmailTaken,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    /// Caller role may not perform the operation
    #[error("{0}")]
    InsufficientRole(&'static str),

    #[error("Token não fornecido")]
    MissingBearer,

    #[error("Formato de token inválido")]
    MalformedBearer,

    /// Bearer token signature invalid or expired
    #[error("Token inválido ou expirado")]
    InvalidBearer,

    #[error("Acesso negado. {0}")]
    Forbidden(&'static str),

    /// Validation and other already-classified errors
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::AccountDisabled
            | AuthError::EmailNotVerified
            | AuthError::PasswordNotSet
            | AuthError::InsufficientRole(_)
            | AuthError::MissingBearer
            | AuthError::MalformedBearer
            | AuthError::InvalidBearer => ErrorKind::Unauthorized,
            AuthError::InvalidVerificationToken => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::NotFound(_) => ErrorKind::NotFound,
            AuthError::Forbidden(_) => ErrorKind::Forbidden,
            AuthError::App(e) => e.kind(),
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidBearer | AuthError::MalformedBearer => {
                tracing::warn!(error = %self, "Rejected bearer token");
            }
            AuthError::Forbidden(_) | AuthError::InsufficientRole(_) => {
                tracing::warn!(error = %self, "Role check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::App(e) => e,
            // 一意制約違反などは kernel 側の変換に任せる
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<platform::token::TokenError> for AuthError {
    fn from(err: platform::token::TokenError) -> Self {
        match err {
            platform::token::TokenError::Invalid(_) => AuthError::InvalidBearer,
            e @ platform::token::TokenError::Signing(_) => AuthError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(AuthError::InvalidVerificationToken.kind().status_code(), 400);
        assert_eq!(AuthError::EmailTaken.kind().status_code(), 409);
        assert_eq!(AuthError::NotFound("Vendedor").kind().status_code(), 404);
        assert_eq!(AuthError::Forbidden("x").kind().status_code(), 403);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AuthError::NotFound("Vendedor").to_string(),
            "Vendedor não encontrado"
        );
        let app: AppError = AuthError::Forbidden(
            "Apenas administradores podem acessar este recurso.",
        )
        .into();
        assert_eq!(
            app.message(),
            "Acesso negado. Apenas administradores podem acessar este recurso."
        );
    }

    #[test]
    fn test_validation_errors_pass_through() {
        let app: AppError = AuthError::from(AppError::bad_request("Email inválido")).into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.message(), "Email inválido");
    }

    #[test]
    fn test_database_unique_violation_keeps_kernel_mapping() {
        let app: AppError = AuthError::Database(sqlx::Error::RowNotFound).into();
        assert_eq!(app.status_code(), 404);
    }
}
