//! Person Password Value Object
//!
//! Domain wrapper around `platform::password`: applies the user-facing
//! length rule and maps platform errors to `AppError`.

use kernel::error::app_error::{AppError, AppResult};
use kernel::validation;
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

/// Minimum password length accepted from users
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Raw password from user input (zeroized on drop)
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// 必須・最小文字数を検証する
    ///
    /// `field` はエラーメッセージに使う項目名（"Senha" / "Nova senha"）。
    pub fn new(raw: Option<String>, field: &str) -> AppResult<Self> {
        validation::required(raw.as_deref(), field)?;
        let raw = raw.unwrap_or_default();
        validation::min_length(&raw, MIN_PASSWORD_LENGTH, field)?;

        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooLong { max, .. } => AppError::bad_request(format!(
                "{} deve ter no máximo {} caracteres",
                field, max
            )),
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request(format!("{} contém caracteres inválidos", field))
            }
        })?;

        Ok(Self(clear_text))
    }

    /// ログイン時の照合用（長さ規則を適用しない）
    ///
    /// 正規化できない入力はどのハッシュとも一致しないため `None`。
    pub fn for_login(raw: String) -> Option<Self> {
        ClearTextPassword::new(raw).ok().map(Self)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed password for database storage (PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct PersonPassword(HashedPassword);

impl PersonPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash(pepper)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))?;
        Ok(Self(hashed))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))?;
        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for PersonPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
