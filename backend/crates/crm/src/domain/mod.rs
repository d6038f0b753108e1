//! Domain Layer
//!
//! Leads, scans and their aggregate statistics.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::lead::{Lead, LeadDetails, LeadWithOwner, OwnerSummary};
pub use entity::scan::QrCodeScan;
pub use repository::{LeadFilter, LeadRepository, ScanRepository};
pub use value_object::lead_status::LeadStatus;
pub use value_object::stats::{LeadCounts, ScanStats, conversion_rate};
