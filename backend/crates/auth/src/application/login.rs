//! Admin Login Use Case
//!
//! Every failure collapses into [`AuthError::InvalidCredentials`] so the
//! response never reveals which check failed.

use std::sync::Arc;

use kernel::validation;

use crate::application::config::AuthConfig;
use crate::domain::entity::person::Person;
use crate::domain::repository::PersonRepository;
use crate::domain::value_object::{email::Email, person_password::RawPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct LoginOutput {
    pub person: Person,
    pub token: String,
}

pub struct LoginUseCase<R>
where
    R: PersonRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: PersonRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        validation::required(input.email.as_deref(), "Email")?;
        validation::required(input.password.as_deref(), "Senha")?;
        let email = Email::new(input.email.unwrap_or_default())?;

        let person = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !person.active {
            return Err(AuthError::InvalidCredentials);
        }

        let password_hash = person
            .password_hash
            .as_ref()
            .ok_or(AuthError::InvalidCredentials)?;
        let raw_password = RawPassword::for_login(input.password.unwrap_or_default())
            .ok_or(AuthError::InvalidCredentials)?;

        if !password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.config.issue_token(&person, person.role)?;

        tracing::info!(person_id = %person.id, role = %person.role, "Signed in");

        Ok(LoginOutput { person, token })
    }
}
