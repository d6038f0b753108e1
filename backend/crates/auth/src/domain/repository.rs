//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::PersonId;

use crate::domain::entity::person::Person;
use crate::domain::value_object::{email::Email, person_role::PersonRole};
use crate::error::AuthResult;

/// Listing filter (results are always newest first)
#[derive(Debug, Clone, Default)]
pub struct PersonFilter {
    /// Restrict to these roles (`None` = any role)
    pub roles: Option<Vec<PersonRole>>,
    pub active_only: bool,
}

impl PersonFilter {
    pub fn admins() -> Self {
        Self {
            roles: Some(vec![PersonRole::Admin, PersonRole::SuperAdmin]),
            active_only: false,
        }
    }

    pub fn matches(&self, person: &Person) -> bool {
        let role_ok = self
            .roles
            .as_ref()
            .is_none_or(|roles| roles.contains(&person.role));
        role_ok && (!self.active_only || person.active)
    }
}

/// Person repository trait
#[trait_variant::make(PersonRepository: Send)]
pub trait LocalPersonRepository {
    async fn create(&self, person: &Person) -> AuthResult<()>;

    async fn find_by_id(&self, id: PersonId) -> AuthResult<Option<Person>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Person>>;

    async fn find_by_qr_code(&self, qr_code: &str) -> AuthResult<Option<Person>>;

    /// Person whose token equals `token` and whose expiry is `>= now`
    async fn find_by_valid_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<Person>>;

    /// Check if email is used by any Person other than `except`
    async fn exists_by_email(&self, email: &Email, except: Option<PersonId>) -> AuthResult<bool>;

    async fn list(&self, filter: &PersonFilter) -> AuthResult<Vec<Person>>;

    /// Persist every mutable field of `person`
    async fn update(&self, person: &Person) -> AuthResult<()>;

    /// Physically delete; returns false if no row existed
    async fn delete(&self, id: PersonId) -> AuthResult<bool>;
}
