//! Router assembly
//!
//! Every bounded context is nested under `/api`; stored files are served
//! from `/uploads`.

use std::path::Path;
use std::sync::Arc;

use auth::middleware::AuthGuard;
use auth::{AuthConfig, auth_router, seller_auth_router};
use axum::{Json, Router, routing::get};
use chrono::{DateTime, Utc};
use crm::{
    CrmAdapters, CrmAppState, lead_router, person_router, qrcode_router, seller_leads_router,
    upload_router,
};
use kernel::AppError;
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "API está funcionando!",
        timestamp: Utc::now(),
    })
}

async fn not_found() -> AppError {
    AppError::not_found("Rota não encontrada")
}

pub fn app<A>(auth_config: Arc<AuthConfig>, crm: CrmAppState<A>, upload_dir: &Path) -> Router
where
    A: CrmAdapters,
    A::Persons: Clone,
{
    let guard = AuthGuard::new(auth_config.clone());
    let persons = <A::Persons as Clone>::clone(&crm.persons);

    // seller self-service auth and the seller lead views share one prefix
    let seller = seller_auth_router(persons.clone(), auth_config.clone())
        .merge(seller_leads_router(crm.clone(), guard.clone()));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_router(persons, auth_config))
        .nest("/api/seller", seller)
        .nest("/api/person", person_router(crm.clone(), guard.clone()))
        .nest("/api/lead", lead_router(crm.clone(), guard.clone()))
        .nest("/api/qrcode", qrcode_router(crm.clone(), guard.clone()))
        .nest("/api/upload", upload_router(crm, guard))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use auth::InMemoryPersonRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use crm::{CrmConfig, InMemoryCrmRepository};
    use platform::mail::LogMailer;
    use platform::storage::FsObjectStorage;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    struct MemoryAdapters;

    impl CrmAdapters for MemoryAdapters {
        type Persons = InMemoryPersonRepository;
        type Records = InMemoryCrmRepository;
        type Mailer = LogMailer;
        type Storage = FsObjectStorage;
    }

    fn test_app(dir: &tempfile::TempDir) -> Router {
        let persons = InMemoryPersonRepository::new();
        let state = CrmAppState::<MemoryAdapters>::new(
            persons.clone(),
            InMemoryCrmRepository::new(persons),
            LogMailer,
            FsObjectStorage::new(dir.path(), "/uploads"),
            Arc::new(CrmConfig::default()),
        );
        let auth_config = Arc::new(AuthConfig::new(b"api-tests", Duration::from_secs(600)));
        app(auth_config, state, dir.path())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(&dir), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "API está funcionando!");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .uri("/api/nothing-here")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(&dir), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "message": "Rota não encontrada" }));
    }

    #[tokio::test]
    async fn test_admin_registration_reaches_person_directory() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir);

        let register = Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Admin", "email": "admin@x.com", "password": "secret1" }).to_string(),
            ))
            .unwrap();
        let (status, body) = send(app.clone(), register).await;
        assert_eq!(status, StatusCode::CREATED);
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let create = Request::builder()
            .method("POST")
            .uri("/api/person")
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(json!({ "name": "Ana" }).to_string()))
            .unwrap();
        let (status, body) = send(app.clone(), create).await;
        assert_eq!(status, StatusCode::CREATED);

        // the QR image is served from /uploads
        let qr_url = body["data"]["qrCodeUrl"].as_str().unwrap().to_string();
        let image = Request::builder().uri(&qr_url).body(Body::empty()).unwrap();
        let response = app.oneshot(image).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_seller_prefix_combines_auth_and_leads() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir);

        let (status, body) = send(
            app.clone(),
            Request::builder()
                .uri("/api/seller/my-leads")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Token não fornecido");

        let (status, body) = send(
            app,
            Request::builder()
                .method("POST")
                .uri("/api/seller/forgot-password")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "email": "ninguem@x.com" }).to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }
}
