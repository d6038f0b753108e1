//! Password Reset Use Case
//!
//! `VERIFIED -> RESET_PENDING -> VERIFIED`. The request step answers the
//! same way whether or not the email exists.

use std::sync::Arc;

use chrono::Utc;
use kernel::validation;

use crate::application::config::AuthConfig;
use crate::application::email_verification::find_by_token;
use crate::domain::repository::PersonRepository;
use crate::domain::value_object::{
    email::Email,
    person_password::{PersonPassword, RawPassword},
};
use crate::error::AuthResult;

pub const RESET_REQUESTED_MESSAGE: &str =
    "Se o email existir, um link de redefinição será enviado.";
pub const PASSWORD_RESET_MESSAGE: &str = "Senha redefinida com sucesso";

pub struct PasswordResetUseCase<R>
where
    R: PersonRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> PasswordResetUseCase<R>
where
    R: PersonRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Issue a 1-hour reset token if the account exists
    ///
    /// The link is not emailed yet; the token only lands in storage.
    pub async fn request(&self, email: Option<String>) -> AuthResult<&'static str> {
        validation::required(email.as_deref(), "Email")?;
        let email = Email::new(email.unwrap_or_default())?;

        let Some(mut person) = self.repo.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(RESET_REQUESTED_MESSAGE);
        };

        let expires_at = person.begin_password_reset(Utc::now()).expires_at();
        self.repo.update(&person).await?;

        tracing::info!(person_id = %person.id, %expires_at, "Password reset token issued");

        Ok(RESET_REQUESTED_MESSAGE)
    }

    pub async fn reset(
        &self,
        token: Option<String>,
        new_password: Option<String>,
    ) -> AuthResult<&'static str> {
        validation::required(token.as_deref(), "Token")?;
        let raw_password = RawPassword::new(new_password, "Nova senha")?;

        let mut person = find_by_token(self.repo.as_ref(), &token.unwrap_or_default()).await?;

        let hash = PersonPassword::from_raw(&raw_password, self.config.pepper())?;
        person.reset_password(hash, Utc::now());
        self.repo.update(&person).await?;

        tracing::info!(person_id = %person.id, "Password reset completed");

        Ok(PASSWORD_RESET_MESSAGE)
    }
}
