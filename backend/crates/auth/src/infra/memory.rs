//! In-memory person store for unit and router tests

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use kernel::id::PersonId;

use crate::domain::entity::person::Person;
use crate::domain::repository::{PersonFilter, PersonRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// `Vec<Person>` behind a mutex; clones share the same storage
#[derive(Clone, Default)]
pub struct InMemoryPersonRepository {
    persons: Arc<Mutex<Vec<Person>>>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Person>> {
        self.persons
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of a stored person
    pub fn get(&self, id: PersonId) -> Option<Person> {
        self.lock().iter().find(|p| p.id == id).cloned()
    }

    /// スキャン数を 1 増やす（存在しない場合は false）
    pub fn increment_scan_count(&self, id: PersonId) -> bool {
        let mut persons = self.lock();
        match persons.iter_mut().find(|p| p.id == id) {
            Some(person) => {
                person.scan_count += 1;
                true
            }
            None => false,
        }
    }

    /// Overwrite a stored person directly (tests use this to age tokens)
    pub fn put(&self, person: Person) {
        let mut persons = self.lock();
        persons.retain(|p| p.id != person.id);
        persons.push(person);
    }
}

impl PersonRepository for InMemoryPersonRepository {
    async fn create(&self, person: &Person) -> AuthResult<()> {
        let mut persons = self.lock();
        if let Some(email) = &person.email
            && persons.iter().any(|p| p.email.as_ref() == Some(email))
        {
            return Err(AuthError::EmailTaken);
        }
        persons.push(person.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PersonId) -> AuthResult<Option<Person>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Person>> {
        Ok(self
            .lock()
            .iter()
            .find(|p| p.email.as_ref() == Some(email))
            .cloned())
    }

    async fn find_by_qr_code(&self, qr_code: &str) -> AuthResult<Option<Person>> {
        Ok(self
            .lock()
            .iter()
            .find(|p| p.qr_code.as_str() == qr_code)
            .cloned())
    }

    async fn find_by_valid_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<Person>> {
        Ok(self
            .lock()
            .iter()
            .find(|p| p.has_valid_token(token, now))
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email, except: Option<PersonId>) -> AuthResult<bool> {
        Ok(self
            .lock()
            .iter()
            .any(|p| p.email.as_ref() == Some(email) && Some(p.id) != except))
    }

    async fn list(&self, filter: &PersonFilter) -> AuthResult<Vec<Person>> {
        let mut persons: Vec<Person> = self
            .lock()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        persons.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(persons)
    }

    async fn update(&self, person: &Person) -> AuthResult<()> {
        let mut persons = self.lock();
        let stored = persons
            .iter_mut()
            .find(|p| p.id == person.id)
            .ok_or(AuthError::NotFound("Registro"))?;
        // scan_count はスキャン記録側だけが更新する
        let scan_count = stored.scan_count;
        *stored = person.clone();
        stored.scan_count = scan_count;
        Ok(())
    }

    async fn delete(&self, id: PersonId) -> AuthResult<bool> {
        let mut persons = self.lock();
        let before = persons.len();
        persons.retain(|p| p.id != id);
        Ok(persons.len() != before)
    }
}
