//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{ClientMeta, CrmAdapters, CrmAppState, PgAdapters};
pub use router::{lead_router, person_router, qrcode_router, seller_leads_router, upload_router};
