//! CRM Routers
//!
//! Mounted by the binary under `/api/person`, `/api/lead`, `/api/qrcode`,
//! `/api/upload`; `seller_leads_router` is merged into `/api/seller`.

use auth::middleware::{AuthGuard, require_admin, require_auth, require_seller};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post},
};

use crate::error::MAX_UPLOAD_BYTES;
use crate::presentation::handlers::{self, CrmAdapters, CrmAppState};

/// Multipart framing on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Seller directory; only the QR lookup is public
pub fn person_router<A: CrmAdapters>(state: CrmAppState<A>, guard: AuthGuard) -> Router {
    let admin_only: Router<CrmAppState<A>> = Router::new()
        .route(
            "/",
            post(handlers::create_person::<A>).get(handlers::list_persons::<A>),
        )
        .route(
            "/{id}",
            get(handlers::get_person::<A>)
                .put(handlers::update_person::<A>)
                .delete(handlers::deactivate_person::<A>),
        )
        .route("/{id}/stats", get(handlers::person_stats::<A>))
        .route("/{id}/hard", delete(handlers::hard_delete_person::<A>))
        .route_layer(middleware::from_fn_with_state(guard, require_admin));

    Router::new()
        .route("/qr/{qrCode}", get(handlers::get_person_by_qr_code::<A>))
        .merge(admin_only)
        .with_state(state)
}

/// Lead management (administrators)
pub fn lead_router<A: CrmAdapters>(state: CrmAppState<A>, guard: AuthGuard) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::create_lead::<A>).get(handlers::list_leads::<A>),
        )
        .route("/stats", get(handlers::lead_stats::<A>))
        .route("/new", get(handlers::new_leads::<A>))
        .route("/owner/{ownerId}", get(handlers::leads_by_owner::<A>))
        .route(
            "/{id}",
            get(handlers::get_lead::<A>)
                .put(handlers::update_lead::<A>)
                .delete(handlers::delete_lead::<A>),
        )
        .route("/{id}/status", patch(handlers::update_lead_status::<A>))
        .route_layer(middleware::from_fn_with_state(guard, require_admin))
        .with_state(state)
}

/// Public scan/lead capture plus admin analytics
pub fn qrcode_router<A: CrmAdapters>(state: CrmAppState<A>, guard: AuthGuard) -> Router {
    let admin_only: Router<CrmAppState<A>> = Router::new()
        .route("/scans/{personId}", get(handlers::scans_by_person::<A>))
        .route("/stats", get(handlers::scan_stats::<A>))
        .route_layer(middleware::from_fn_with_state(guard, require_admin));

    Router::new()
        .route("/scan/{qrCode}", post(handlers::scan_qr_code::<A>))
        .route("/lead/{qrCode}", post(handlers::create_lead_from_qr::<A>))
        .merge(admin_only)
        .with_state(state)
}

/// `/my-leads` and `/my-stats` for SELLER tokens
pub fn seller_leads_router<A: CrmAdapters>(state: CrmAppState<A>, guard: AuthGuard) -> Router {
    Router::new()
        .route("/my-leads", get(handlers::my_leads::<A>))
        .route("/my-leads/{id}", get(handlers::my_lead::<A>))
        .route("/my-stats", get(handlers::my_stats::<A>))
        .route_layer(middleware::from_fn_with_state(guard, require_seller))
        .with_state(state)
}

/// File uploads (multipart field `file`)
pub fn upload_router<A: CrmAdapters>(state: CrmAppState<A>, guard: AuthGuard) -> Router {
    let authenticated: Router<CrmAppState<A>> = Router::new()
        .route("/profile", post(handlers::upload_profile_photo::<A>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth));

    Router::new()
        .route("/energy-bill", post(handlers::upload_energy_bill::<A>))
        .route("/roof-photo", post(handlers::upload_roof_photo::<A>))
        .merge(authenticated)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD))
        .with_state(state)
}
