//! Auth Routers
//!
//! `auth_router` is mounted at `/api/auth`, `seller_auth_router` at
//! `/api/seller`.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::PersonRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGuard, require_admin, require_seller};

/// Administrator authentication and user management
pub fn auth_router<R>(repo: R, config: Arc<AuthConfig>) -> Router
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let guard = AuthGuard::new(config.clone());
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
    };

    let admin_only: Router<AuthAppState<R>> = Router::new()
        .route("/users", get(handlers::list_users::<R>))
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route("/admin/users", post(handlers::create_admin_user::<R>))
        .route_layer(middleware::from_fn_with_state(guard, require_admin));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .merge(admin_only)
        .with_state(state)
}

/// Seller self-service authentication
///
/// The seller lead routes (`/my-leads`, `/my-stats`) live in the crm crate
/// and are merged under the same prefix by the binary.
pub fn seller_auth_router<R>(repo: R, config: Arc<AuthConfig>) -> Router
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let guard = AuthGuard::new(config.clone());
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
    };

    let seller_only: Router<AuthAppState<R>> = Router::new()
        .route("/profile", get(handlers::seller_profile::<R>))
        .route_layer(middleware::from_fn_with_state(guard, require_seller));

    Router::new()
        .route("/login", post(handlers::seller_login::<R>))
        .route("/verify/{token}", get(handlers::verify_email::<R>))
        .route("/set-password", post(handlers::set_password::<R>))
        .route("/forgot-password", post(handlers::forgot_password::<R>))
        .route("/reset-password", post(handlers::reset_password::<R>))
        .merge(seller_only)
        .with_state(state)
}
