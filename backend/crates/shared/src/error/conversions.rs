//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`],
//! and the terminal HTTP rendering of every error.

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal("I/O operation failed").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request("JSON inválido").with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// 一意制約違反時のメッセージ（制約名に `email` を含む場合は専用メッセージ）
#[cfg(feature = "sqlx")]
fn unique_violation_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("email") => "Email já está cadastrado no sistema",
        _ => "Valor já está cadastrado no sistema",
    }
}

/// SQLSTATE からエラーを分類する
///
/// 23xxx は利用者の入力に起因（重複メール、存在しない Vendedor への Lead 等）、
/// 53xxx / 57xxx はデータベース側の資源不足・停止。
#[cfg(feature = "sqlx")]
fn classify_database_error(code: Option<&str>, constraint: Option<&str>) -> AppError {
    let Some(code) = code else {
        return AppError::internal("Database error");
    };
    match code {
        "23505" => AppError::conflict(unique_violation_message(constraint)),
        "23503" => AppError::not_found("Registro relacionado não encontrado"),
        "23502" | "23514" => AppError::new(ErrorKind::BadRequest, "Dados inválidos"),
        _ if code.starts_with("53") => AppError::service_unavailable("Database resource exhausted"),
        _ if code.starts_with("57") => AppError::service_unavailable("Database unavailable"),
        _ => AppError::internal(format!("Database error (SQLSTATE {code})")),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let app_err = match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Registro não encontrado"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::service_unavailable("Database connection pool exhausted")
            }
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                AppError::service_unavailable("Database connection error")
            }
            sqlx::Error::Database(db_err) => {
                classify_database_error(db_err.code().as_deref(), db_err.constraint())
            }
            _ => AppError::internal("Database error"),
        };
        app_err.with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_server_error() {
            tracing::error!(error = ?self, "Request failed with server error");
        }

        let body = serde_json::json!({
            "success": false,
            "message": self.public_message(),
        });

        (status, Json(body)).into_response()
    }
}

/// Malformed or non-JSON request bodies
#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected JSON body");
        AppError::bad_request("JSON inválido")
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        AppError::bad_request(format!("Parâmetros inválidos: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_io_error_is_internal() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_unique_violation_message() {
        assert_eq!(
            unique_violation_message(Some("persons_email_key")),
            "Email já está cadastrado no sistema"
        );
        assert_eq!(
            unique_violation_message(Some("persons_qr_code_key")),
            "Valor já está cadastrado no sistema"
        );
        assert_eq!(unique_violation_message(None), "Valor já está cadastrado no sistema");
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlstate_classification() {
        let dup = classify_database_error(Some("23505"), Some("persons_email_key"));
        assert_eq!(dup.kind(), ErrorKind::Conflict);
        assert_eq!(dup.message(), "Email já está cadastrado no sistema");

        let orphan = classify_database_error(Some("23503"), Some("leads_owner_id_fkey"));
        assert_eq!(orphan.kind(), ErrorKind::NotFound);

        assert_eq!(
            classify_database_error(Some("57P01"), None).kind(),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            classify_database_error(Some("42P01"), None).kind(),
            ErrorKind::InternalServerError
        );
        assert_eq!(classify_database_error(None, None).kind(), ErrorKind::InternalServerError);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_row_not_found_conversion() {
        let app_err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(app_err.kind(), ErrorKind::NotFound);
        assert_eq!(app_err.message(), "Registro não encontrado");
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_envelope() {
        use axum::response::IntoResponse;

        let response = AppError::conflict("Email já cadastrado").into_response();
        assert_eq!(response.status(), 409);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Email já cadastrado");
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_hides_server_errors() {
        use axum::response::IntoResponse;

        let response = AppError::internal("relation \"persons\" does not exist").into_response();
        assert_eq!(response.status(), 500);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Erro interno do servidor");
    }
}
