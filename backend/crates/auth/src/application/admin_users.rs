//! Administrator Account Management
//!
//! List / read / update / delete administrator accounts, and let an
//! administrator create another one.

use std::sync::Arc;

use chrono::Utc;
use kernel::error::app_error::AppError;
use kernel::id::PersonId;
use kernel::validation;

use crate::application::config::AuthConfig;
use crate::application::register::{RegisterInput, create_admin_person, parse_admin_role};
use crate::domain::entity::person::Person;
use crate::domain::repository::{PersonFilter, PersonRepository};
use crate::domain::value_object::{
    email::Email,
    person_password::{PersonPassword, RawPassword},
    person_role::PersonRole,
};
use crate::error::{AuthError, AuthResult};

const USER: &str = "Usuário";

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

pub struct ManageUsersUseCase<R>
where
    R: PersonRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ManageUsersUseCase<R>
where
    R: PersonRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// ADMIN / SUPER_ADMIN only, newest first
    pub async fn list(&self) -> AuthResult<Vec<Person>> {
        self.repo.list(&PersonFilter::admins()).await
    }

    pub async fn get(&self, id: PersonId) -> AuthResult<Person> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|p| p.role.is_admin_or_higher())
            .ok_or(AuthError::NotFound(USER))
    }

    /// Apply `input` on behalf of `caller_role`
    ///
    /// Promoting to SUPER_ADMIN or touching an existing SUPER_ADMIN requires
    /// a SUPER_ADMIN caller.
    pub async fn update(
        &self,
        id: PersonId,
        input: UpdateUserInput,
        caller_role: PersonRole,
    ) -> AuthResult<Person> {
        let mut person = self.get(id).await?;
        let new_role = input
            .role
            .as_deref()
            .map(|role| {
                PersonRole::from_code(role.trim())
                    .ok_or_else(|| AuthError::from(AppError::bad_request("Role inválida")))
            })
            .transpose()?;
        let promotes = new_role.is_some_and(|role| role.is_super_admin());
        ensure_may_manage(&person, caller_role, promotes)?;
        let now = Utc::now();

        if let Some(name) = input.name {
            validation::required(Some(name.as_str()), "Nome")?;
            person.name = name.trim().to_string();
        }

        if let Some(email) = input.email {
            let email = Email::new(email)?;
            if self.repo.exists_by_email(&email, Some(id)).await? {
                return Err(AuthError::EmailTaken);
            }
            person.email = Some(email);
        }

        if input.password.is_some() {
            let raw_password = RawPassword::new(input.password, "Senha")?;
            let hash = PersonPassword::from_raw(&raw_password, self.config.pepper())?;
            person.set_password(hash, now);
        }

        if let Some(role) = new_role {
            person.role = role;
        }

        if let Some(active) = input.active {
            person.active = active;
        }

        person.updated_at = now;
        self.repo.update(&person).await?;

        tracing::info!(person_id = %person.id, "Administrator updated");

        Ok(person)
    }

    /// Physically removes the account and returns its last state
    pub async fn delete(&self, id: PersonId, caller_role: PersonRole) -> AuthResult<Person> {
        let person = self.get(id).await?;
        ensure_may_manage(&person, caller_role, false)?;
        if !self.repo.delete(id).await? {
            return Err(AuthError::NotFound(USER));
        }

        tracing::info!(person_id = %person.id, "Administrator deleted");

        Ok(person)
    }

    /// Create an administrator on behalf of `creator_role`
    ///
    /// Only ADMIN / SUPER_ADMIN may call this, and only a SUPER_ADMIN may
    /// create another SUPER_ADMIN.
    pub async fn create_admin(
        &self,
        input: RegisterInput,
        creator_role: PersonRole,
    ) -> AuthResult<Person> {
        if !creator_role.is_admin_or_higher() {
            return Err(AuthError::InsufficientRole(
                "Apenas administradores podem criar usuários",
            ));
        }
        if parse_admin_role(input.role.as_deref())?.is_super_admin()
            && !creator_role.is_super_admin()
        {
            return Err(AuthError::InsufficientRole(
                "Apenas SUPER_ADMIN pode criar outro SUPER_ADMIN",
            ));
        }

        let person = create_admin_person(self.repo.as_ref(), &self.config, input).await?;

        tracing::info!(
            person_id = %person.id,
            role = %person.role,
            created_by = %creator_role,
            "Administrator created"
        );

        Ok(person)
    }
}

fn ensure_may_manage(target: &Person, caller_role: PersonRole, promotes: bool) -> AuthResult<()> {
    if caller_role.is_super_admin() {
        return Ok(());
    }
    if target.role.is_super_admin() || promotes {
        return Err(AuthError::InsufficientRole(
            "Apenas SUPER_ADMIN pode gerenciar um SUPER_ADMIN",
        ));
    }
    Ok(())
}
