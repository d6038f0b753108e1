//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias. Context
//! errors (auth, crm) convert into it at the HTTP boundary.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// HTTP 層では `{ "success": false, "message": ... }` に変換されます。
/// `message` はポルトガル語の利用者向け文言、`source` はログ専用です。
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "Vendedor não encontrado");
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.public_message(), "Vendedor não encontrado");
///
/// let err = AppError::internal("pool timed out");
/// assert_eq!(err.public_message(), "Erro interno do servidor");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>` の省略形
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// 400（入力検証・不正なステータス・ファイル形式）
    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    #[inline]
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// 500（メッセージはログにのみ出る）
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    #[inline]
    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// 元のエラーを付与（ログ用）
    ///
    /// ```rust
    /// use kernel::AppError;
    ///
    /// let io = std::io::Error::other("disk full");
    /// let err = AppError::internal("Falha ao salvar arquivo").with_source(io);
    /// assert!(std::error::Error::source(&err).is_some());
    /// ```
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// クライアントに返して良いメッセージ
    ///
    /// 5xx の場合は [`ErrorKind::fallback_message`] に置き換えます。
    #[inline]
    pub fn public_message(&self) -> &str {
        if self.is_server_error() {
            self.kind.fallback_message()
        } else {
            &self.message
        }
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind).field("message", &self.message);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pick_kind() {
        assert_eq!(AppError::bad_request("Nome é obrigatório").status_code(), 400);
        assert_eq!(AppError::unauthorized("Token inválido").status_code(), 401);
        assert_eq!(AppError::forbidden("Acesso negado").status_code(), 403);
        assert_eq!(AppError::not_found("Lead não encontrado").status_code(), 404);
        assert_eq!(AppError::conflict("Email já cadastrado").status_code(), 409);
        assert_eq!(AppError::internal("boom").status_code(), 500);
        assert_eq!(AppError::service_unavailable("pool").status_code(), 503);
    }

    #[test]
    fn test_public_message_hides_server_details() {
        let err = AppError::internal("connection reset by peer");
        assert_eq!(err.public_message(), "Erro interno do servidor");
        assert_eq!(err.message(), "connection reset by peer");

        let err = AppError::service_unavailable("Database connection pool exhausted");
        assert_eq!(err.public_message(), "Serviço indisponível");

        let err = AppError::conflict("Email já cadastrado");
        assert_eq!(err.public_message(), "Email já cadastrado");
    }

    #[test]
    fn test_display_and_debug() {
        let err = AppError::not_found("Lead não encontrado");
        assert_eq!(err.to_string(), "[Not Found] Lead não encontrado");

        let err = AppError::internal("Falha ao salvar").with_source(std::io::Error::other("disk full"));
        let debug = format!("{err:?}");
        assert!(debug.contains("disk full"));
        assert!(err.source().is_some());
    }
}
