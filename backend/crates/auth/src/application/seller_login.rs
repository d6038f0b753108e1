//! Seller Login Use Case
//!
//! Unlike the admin login, readiness failures get their own messages so a
//! seller knows whether to verify their email or finish registration.
//! The issued token always carries the SELLER role.

use std::sync::Arc;

use kernel::validation;

use crate::application::config::AuthConfig;
use crate::domain::entity::person::Person;
use crate::domain::repository::PersonRepository;
use crate::domain::value_object::{
    email::Email, person_password::RawPassword, person_role::PersonRole,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
pub struct SellerLoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct SellerLoginOutput {
    pub person: Person,
    pub token: String,
}

pub struct SellerLoginUseCase<R>
where
    R: PersonRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SellerLoginUseCase<R>
where
    R: PersonRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SellerLoginInput) -> AuthResult<SellerLoginOutput> {
        validation::required(input.email.as_deref(), "Email")?;
        validation::required(input.password.as_deref(), "Senha")?;
        let email = Email::new(input.email.unwrap_or_default())?;

        let person = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !person.active {
            return Err(AuthError::AccountDisabled);
        }
        if !person.email_verified {
            return Err(AuthError::EmailNotVerified);
        }
        let password_hash = person
            .password_hash
            .as_ref()
            .ok_or(AuthError::PasswordNotSet)?;

        let raw_password = RawPassword::for_login(input.password.unwrap_or_default())
            .ok_or(AuthError::InvalidCredentials)?;
        if !password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.config.issue_token(&person, PersonRole::Seller)?;

        tracing::info!(person_id = %person.id, "Seller signed in");

        Ok(SellerLoginOutput { person, token })
    }
}
