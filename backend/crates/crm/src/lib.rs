//! CRM Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Lead and QR scan entities, statistics, repository traits
//! - `application/` - Seller directory, leads, QR scans, uploads
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Features
//! - Seller directory with QR code publication and verification email
//! - Public QR landing: scan tracking and lead capture form
//! - Lead status lifecycle (NEGOTIATION / BOUGHT / CANCELLED) and conversion stats
//! - Seller-scoped lead views
//! - Image/PDF uploads for profiles and lead attachments
//!
//! Persons are owned by the `auth` crate; this crate reaches them through
//! [`auth::PersonRepository`] and reuses its bearer guards.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::CrmConfig;
pub use domain::{LeadStatus, LeadCounts, ScanStats};
pub use error::{CrmError, CrmResult, MAX_UPLOAD_BYTES};
#[cfg(any(test, feature = "test-util"))]
pub use infra::memory::InMemoryCrmRepository;
pub use infra::postgres::PgCrmRepository;
pub use presentation::{
    CrmAdapters, CrmAppState, PgAdapters, lead_router, person_router, qrcode_router,
    seller_leads_router, upload_router,
};
