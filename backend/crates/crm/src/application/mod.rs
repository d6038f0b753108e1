//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod leads;
pub mod person_directory;
pub mod qr_scans;
pub mod uploads;

// Re-exports
pub use config::CrmConfig;
pub use leads::{CreateLeadInput, LeadUseCase, UpdateLeadInput};
pub use person_directory::{
    ActivityCounts, CreatePersonInput, PersonDetail, PersonDirectoryUseCase, PersonStats,
    PersonWithCounts, UpdatePersonInput,
};
pub use qr_scans::QrScanUseCase;
pub use uploads::{UploadFolder, UploadUseCase, UploadedFile};
