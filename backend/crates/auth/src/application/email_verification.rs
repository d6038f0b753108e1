//! Email Verification Use Case
//!
//! `CREATED -> VERIFIED`: the seller opens the emailed link (read-only
//! check), then chooses a password, which consumes the token.

use std::sync::Arc;

use chrono::Utc;
use kernel::validation;

use crate::application::config::AuthConfig;
use crate::domain::entity::person::Person;
use crate::domain::repository::PersonRepository;
use crate::domain::value_object::{
    person_password::{PersonPassword, RawPassword},
    person_role::PersonRole,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
pub struct SetPasswordInput {
    pub token: Option<String>,
    pub password: Option<String>,
}

pub struct SetPasswordOutput {
    pub person: Person,
    pub token: String,
}

pub struct EmailVerificationUseCase<R>
where
    R: PersonRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> EmailVerificationUseCase<R>
where
    R: PersonRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Resolve the token without consuming it
    pub async fn verify(&self, token: &str) -> AuthResult<Person> {
        validation::required(Some(token), "Token")?;
        find_by_token(self.repo.as_ref(), token).await
    }

    /// Set the first password, mark the email verified and consume the token
    pub async fn set_password(&self, input: SetPasswordInput) -> AuthResult<SetPasswordOutput> {
        validation::required(input.token.as_deref(), "Token")?;
        let raw_password = RawPassword::new(input.password, "Senha")?;

        let token = input.token.unwrap_or_default();
        let mut person = find_by_token(self.repo.as_ref(), &token).await?;

        let hash = PersonPassword::from_raw(&raw_password, self.config.pepper())?;
        person.complete_verification(hash, Utc::now());
        self.repo.update(&person).await?;

        let token = self.config.issue_token(&person, PersonRole::Seller)?;

        tracing::info!(person_id = %person.id, "Seller email verified and password set");

        Ok(SetPasswordOutput { person, token })
    }
}

/// 一致かつ期限内のトークンを持つ Person を探す
pub(crate) async fn find_by_token<R: PersonRepository>(repo: &R, token: &str) -> AuthResult<Person> {
    repo.find_by_valid_token(token.trim(), Utc::now())
        .await?
        .ok_or(AuthError::InvalidVerificationToken)
}
