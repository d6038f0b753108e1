//! CRM Error Types
//!
//! Lead, scan and upload errors. Like the auth context, every variant maps
//! onto a `kernel::ErrorKind` and renders through `AppError`.

use auth::AuthError;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::storage::StorageError;
use thiserror::Error;

pub type CrmResult<T> = Result<T, CrmError>;

/// Maximum accepted upload size in bytes (5 MB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("QR Code inválido")]
    InvalidQrCode,

    #[error("Vendedor desativado")]
    SellerDisabled,

    #[error("Status inválido")]
    InvalidStatus,

    #[error("Email já cadastrado")]
    EmailTaken,

    #[error("Nenhum arquivo enviado")]
    MissingFile,

    #[error("Arquivo excede o tamanho máximo de 5MB")]
    FileTooLarge,

    #[error("Tipo de arquivo não permitido")]
    UnsupportedFileType,

    /// Errors from the person store
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CrmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CrmError::NotFound(_) | CrmError::InvalidQrCode => ErrorKind::NotFound,
            CrmError::SellerDisabled
            | CrmError::InvalidStatus
            | CrmError::MissingFile
            | CrmError::FileTooLarge
            | CrmError::UnsupportedFileType => ErrorKind::BadRequest,
            CrmError::EmailTaken => ErrorKind::Conflict,
            CrmError::Auth(e) => e.kind(),
            CrmError::App(e) => e.kind(),
            CrmError::Database(_) | CrmError::Storage(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            CrmError::Database(e) => tracing::error!(error = %e, "CRM database error"),
            CrmError::Storage(e) => tracing::error!(error = %e, "CRM storage error"),
            CrmError::SellerDisabled | CrmError::InvalidQrCode => {
                tracing::warn!(error = %self, "Rejected QR code")
            }
            _ => tracing::debug!(error = %self, "CRM error"),
        }
    }
}

impl From<CrmError> for AppError {
    fn from(err: CrmError) -> Self {
        match err {
            CrmError::App(e) => e,
            CrmError::Auth(e) => AppError::from(e),
            CrmError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for CrmError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
