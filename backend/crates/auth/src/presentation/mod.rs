//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthGuard, CurrentPerson, require_admin, require_auth, require_seller};
pub use router::{auth_router, seller_auth_router};
