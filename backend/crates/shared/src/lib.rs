//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every bounded context of the
//! lead platform agrees on:
//! - Common error types, result aliases and the HTTP error envelope
//! - Typed entity IDs (Person, Lead, QR code scan)
//! - Input validation rules (`required`, `email`, `min_length`)
//! - The `{ success, data, message }` response envelope
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
#[cfg(feature = "axum")]
pub mod response;
pub mod validation;

pub use error::app_error::{AppError, AppResult};
pub use error::kind::ErrorKind;
