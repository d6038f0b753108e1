//! Error Kind - Classification of errors
//!
//! Every failure in the lead platform lands in one of a handful of HTTP
//! buckets. [`ErrorKind`] names the bucket; the message travels on
//! [`AppError`](super::app_error::AppError).

use serde::Serialize;

/// エラー種別
///
/// | kind | status | 典型例 |
/// |------|--------|--------|
/// | `BadRequest` | 400 | 必須項目の欠落、不正なステータス、ファイル形式 |
/// | `Unauthorized` | 401 | トークンなし・期限切れ、パスワード不一致 |
/// | `Forbidden` | 403 | 販売者が管理者 API を呼んだ |
/// | `NotFound` | 404 | 存在しない Vendedor / Lead / QR Code |
/// | `Conflict` | 409 | Email の重複 |
/// | `InternalServerError` | 500 | DB・ストレージ障害 |
/// | `ServiceUnavailable` | 503 | DB プールが枯渇 |
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Conflict.status_code(), 409);
/// assert_eq!(ErrorKind::NotFound.fallback_message(), "Recurso não encontrado");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    InternalServerError,
    ServiceUnavailable,
}

impl ErrorKind {
    #[inline]
    pub const fn status_code(&self) -> u16 {
        use ErrorKind::*;
        match self {
            BadRequest => 400,
            Unauthorized => 401,
            Forbidden => 403,
            NotFound => 404,
            Conflict => 409,
            InternalServerError => 500,
            ServiceUnavailable => 503,
        }
    }

    /// ログ用の理由フレーズ（`Display` でも使う）
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            BadRequest => "Bad Request",
            Unauthorized => "Unauthorized",
            Forbidden => "Forbidden",
            NotFound => "Not Found",
            Conflict => "Conflict",
            InternalServerError => "Internal Server Error",
            ServiceUnavailable => "Service Unavailable",
        }
    }

    /// クライアント向けの既定メッセージ
    ///
    /// 5xx ではエラー本文の代わりにこれを返し、内部情報を漏らさない。
    #[inline]
    pub const fn fallback_message(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            BadRequest => "Requisição inválida",
            Unauthorized => "Não autorizado",
            Forbidden => "Acesso negado",
            NotFound => "Recurso não encontrado",
            Conflict => "Conflito de dados",
            InternalServerError => "Erro interno do servidor",
            ServiceUnavailable => "Serviço indisponível",
        }
    }

    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    #[inline]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status_code(), 400..=499)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorKind; 7] = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::InternalServerError,
        ErrorKind::ServiceUnavailable,
    ];

    #[test]
    fn test_exactly_two_server_kinds() {
        let server: Vec<_> = ALL.iter().filter(|k| k.is_server_error()).collect();
        assert_eq!(
            server,
            [&ErrorKind::InternalServerError, &ErrorKind::ServiceUnavailable]
        );
        assert!(ALL.iter().all(|k| k.is_server_error() != k.is_client_error()));
    }

    #[test]
    fn test_fallback_messages_are_portuguese() {
        assert_eq!(
            ErrorKind::InternalServerError.fallback_message(),
            "Erro interno do servidor"
        );
        assert_eq!(ErrorKind::Forbidden.fallback_message(), "Acesso negado");
    }

    #[test]
    fn test_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, "\"NOT_FOUND\"");
        assert_eq!(ErrorKind::Conflict.to_string(), "Conflict");
    }
}
