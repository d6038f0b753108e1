//! Seller Profile Use Case

use std::sync::Arc;

use kernel::id::PersonId;

use crate::domain::entity::person::Person;
use crate::domain::repository::PersonRepository;
use crate::error::{AuthError, AuthResult};

pub struct SellerProfileUseCase<R>
where
    R: PersonRepository,
{
    repo: Arc<R>,
}

impl<R> SellerProfileUseCase<R>
where
    R: PersonRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: PersonId) -> AuthResult<Person> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound("Vendedor"))
    }
}
