//! Register Use Case
//!
//! Creates an administrator account and signs it in.

use std::sync::Arc;

use chrono::Utc;
use kernel::error::app_error::AppError;
use kernel::validation;

use crate::application::config::AuthConfig;
use crate::domain::entity::person::Person;
use crate::domain::repository::PersonRepository;
use crate::domain::value_object::{
    email::Email,
    person_password::{PersonPassword, RawPassword},
    person_role::PersonRole,
};
use crate::error::{AuthError, AuthResult};

/// Register / create-admin input
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// "ADMIN" (default) or "SUPER_ADMIN"
    pub role: Option<String>,
}

pub struct RegisterOutput {
    pub person: Person,
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: PersonRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: PersonRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let person = create_admin_person(self.repo.as_ref(), &self.config, input).await?;
        let token = self.config.issue_token(&person, person.role)?;

        tracing::info!(person_id = %person.id, role = %person.role, "Administrator registered");

        Ok(RegisterOutput { person, token })
    }
}

/// 管理者ロールのパース（未指定は ADMIN、SELLER は不可）
pub(crate) fn parse_admin_role(role: Option<&str>) -> AuthResult<PersonRole> {
    match role.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(PersonRole::Admin),
        Some(code) => match PersonRole::from_code(code) {
            Some(role) if role.is_admin_or_higher() => Ok(role),
            _ => Err(AppError::bad_request("Role inválida").into()),
        },
    }
}

/// Shared by `register` and admin-created accounts
pub(crate) async fn create_admin_person<R: PersonRepository>(
    repo: &R,
    config: &AuthConfig,
    input: RegisterInput,
) -> AuthResult<Person> {
    validation::required(input.name.as_deref(), "Nome")?;
    validation::required(input.email.as_deref(), "Email")?;
    validation::required(input.password.as_deref(), "Senha")?;

    let email = Email::new(input.email.unwrap_or_default())?;
    let raw_password = RawPassword::new(input.password, "Senha")?;
    let role = parse_admin_role(input.role.as_deref())?;

    if repo.exists_by_email(&email, None).await? {
        return Err(AuthError::EmailTaken);
    }

    let password_hash = PersonPassword::from_raw(&raw_password, config.pepper())?;
    let name = input.name.unwrap_or_default().trim().to_string();
    let person = Person::new_admin(name, email, password_hash, role, Utc::now());

    repo.create(&person).await?;

    Ok(person)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_role() {
        assert_eq!(parse_admin_role(None).unwrap(), PersonRole::Admin);
        assert_eq!(parse_admin_role(Some("")).unwrap(), PersonRole::Admin);
        assert_eq!(
            parse_admin_role(Some("SUPER_ADMIN")).unwrap(),
            PersonRole::SuperAdmin
        );
        assert!(parse_admin_role(Some("SELLER")).is_err());
        assert!(parse_admin_role(Some("root")).is_err());
    }
}
