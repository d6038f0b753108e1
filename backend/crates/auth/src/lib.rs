//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Person entity, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, bearer guards
//!
//! ## Features
//! - Administrator register/login and user management
//! - Seller self-service: email verification, password setup and reset
//! - Stateless HS256 bearer tokens carrying `{ userId, email, role }`
//! - Role-based access (SuperAdmin, Admin, Seller)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Administrator login never reveals which check failed
//! - Verification and reset tokens are single-use and time-limited

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::person::{ContactDetails, Person, SellerAuthState};
pub use domain::repository::{PersonFilter, PersonRepository};
pub use error::{AuthError, AuthResult};
#[cfg(any(test, feature = "test-util"))]
pub use infra::memory::InMemoryPersonRepository;
pub use infra::postgres::PgPersonRepository;
pub use presentation::router::{auth_router, seller_auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
