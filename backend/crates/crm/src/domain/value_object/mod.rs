pub mod lead_status;
pub mod stats;
