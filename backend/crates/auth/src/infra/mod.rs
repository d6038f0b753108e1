//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryPersonRepository;
pub use postgres::PgPersonRepository;
