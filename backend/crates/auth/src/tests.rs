//! Unit tests for the auth crate
//! Use cases run against the in-memory repository; router tests go through
//! the full axum stack with `oneshot`.

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;

    use crate::application::config::AuthConfig;
    use crate::domain::entity::person::{ContactDetails, Person};
    use crate::domain::repository::PersonRepository;
    use crate::domain::value_object::email::Email;
    use crate::infra::memory::InMemoryPersonRepository;

    pub fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::new(b"auth-tests-secret", Duration::from_secs(3600)))
    }

    pub fn repo() -> Arc<InMemoryPersonRepository> {
        Arc::new(InMemoryPersonRepository::new())
    }

    /// Freshly created seller (CREATED state, token issued)
    pub async fn seller(repo: &InMemoryPersonRepository, email: &str) -> Person {
        let person = Person::new_seller(
            "Vendedor Teste".to_string(),
            Some(Email::new(email).unwrap()),
            ContactDetails::default(),
            Utc::now(),
        );
        repo.create(&person).await.unwrap();
        person
    }

    /// Message as rendered in the response envelope
    pub fn message_of(err: crate::error::AuthError) -> String {
        kernel::AppError::from(err).message().to_string()
    }

    pub fn token_of(person: &Person) -> String {
        person.verification.as_ref().unwrap().as_str().to_string()
    }
}

#[cfg(test)]
mod admin_auth_tests {
    use super::support::*;
    use crate::application::{
        LoginInput, LoginUseCase, ManageUsersUseCase, RegisterInput, RegisterUseCase,
        UpdateUserInput,
    };
    use crate::domain::repository::{PersonFilter, PersonRepository};
    use crate::domain::value_object::person_role::PersonRole;
    use crate::error::AuthError;

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput {
            name: Some("Admin".to_string()),
            email: Some(email.to_string()),
            password: Some("secret1".to_string()),
            role: None,
        }
    }

    fn login_input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_defaults_to_admin() {
        let repo = repo();
        let use_case = RegisterUseCase::new(repo.clone(), config());

        let output = use_case.execute(register_input("boss@x.com")).await.unwrap();
        assert_eq!(output.person.role, PersonRole::Admin);
        assert!(output.person.email_verified);
        assert!(output.person.qr_code.as_str().starts_with("ADMIN-"));

        let claims = config().tokens.verify(&output.token).unwrap();
        assert_eq!(claims.role, "ADMIN");
        assert_eq!(claims.user_id, output.person.id.to_string());
    }

    #[tokio::test]
    async fn test_duplicate_register_conflicts_without_new_row() {
        let repo = repo();
        let use_case = RegisterUseCase::new(repo.clone(), config());

        use_case.execute(register_input("dup@x.com")).await.unwrap();
        let err = use_case
            .execute(register_input("DUP@x.com"))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(err.to_string(), "Email já cadastrado");
        assert_eq!(repo.list(&PersonFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_validation_messages() {
        let use_case = RegisterUseCase::new(repo(), config());

        let mut input = register_input("a@x.com");
        input.name = None;
        let err = use_case.execute(input).await.err().unwrap();
        assert_eq!(message_of(err), "Nome é obrigatório");

        let err = use_case
            .execute(register_input("not-an-email"))
            .await
            .err()
            .unwrap();
        assert_eq!(message_of(err), "Email inválido");

        let mut input = register_input("b@x.com");
        input.password = Some("12345".to_string());
        let err = use_case.execute(input).await.err().unwrap();
        assert_eq!(message_of(err), "Senha deve ter no mínimo 6 caracteres");

        let mut input = register_input("c@x.com");
        input.role = Some("SELLER".to_string());
        let err = use_case.execute(input).await.err().unwrap();
        assert_eq!(err.kind().status_code(), 400);
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let repo = repo();
        RegisterUseCase::new(repo.clone(), config())
            .execute(register_input("admin@x.com"))
            .await
            .unwrap();
        let login = LoginUseCase::new(repo.clone(), config());

        let wrong_password = login
            .execute(login_input("admin@x.com", "wrong-password"))
            .await
            .err()
            .unwrap();
        let unknown = login
            .execute(login_input("ghost@x.com", "secret1"))
            .await
            .err()
            .unwrap();

        let mut admin = repo
            .list(&PersonFilter::admins())
            .await
            .unwrap()
            .remove(0);
        admin.deactivate(chrono::Utc::now());
        repo.update(&admin).await.unwrap();
        let inactive = login
            .execute(login_input("admin@x.com", "secret1"))
            .await
            .err()
            .unwrap();

        for err in [wrong_password, unknown, inactive] {
            assert!(matches!(err, AuthError::InvalidCredentials));
            assert_eq!(err.to_string(), "Credenciais inválidas");
        }
    }

    #[tokio::test]
    async fn test_login_without_password_hash_is_invalid_credentials() {
        let repo = repo();
        seller(&repo, "nopass@x.com").await;

        let err = LoginUseCase::new(repo.clone(), config())
            .execute(login_input("nopass@x.com", "whatever"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_user_listing_excludes_sellers() {
        let repo = repo();
        RegisterUseCase::new(repo.clone(), config())
            .execute(register_input("admin@x.com"))
            .await
            .unwrap();
        let seller = seller(&repo, "seller@x.com").await;

        let users = ManageUsersUseCase::new(repo.clone(), config());
        let listed = users.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].role, PersonRole::Admin);

        let err = users.get(seller.id).await.err().unwrap();
        assert_eq!(err.kind().status_code(), 404);
    }

    #[tokio::test]
    async fn test_update_user_rejects_taken_email_and_rehashes_password() {
        let repo = repo();
        let register = RegisterUseCase::new(repo.clone(), config());
        let first = register.execute(register_input("one@x.com")).await.unwrap();
        register.execute(register_input("two@x.com")).await.unwrap();

        let users = ManageUsersUseCase::new(repo.clone(), config());
        let err = users
            .update(
                first.person.id,
                UpdateUserInput {
                    email: Some("two@x.com".to_string()),
                    ..Default::default()
                },
                PersonRole::Admin,
            )
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind().status_code(), 409);

        users
            .update(
                first.person.id,
                UpdateUserInput {
                    password: Some("brand-new".to_string()),
                    ..Default::default()
                },
                PersonRole::Admin,
            )
            .await
            .unwrap();
        let login = LoginUseCase::new(repo.clone(), config());
        assert!(login.execute(login_input("one@x.com", "brand-new")).await.is_ok());
        assert!(login.execute(login_input("one@x.com", "secret1")).await.is_err());
    }

    #[tokio::test]
    async fn test_create_admin_role_rules() {
        let repo = repo();
        let users = ManageUsersUseCase::new(repo.clone(), config());

        let err = users
            .create_admin(register_input("a@x.com"), PersonRole::Seller)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::InsufficientRole(_)));

        let mut super_input = register_input("b@x.com");
        super_input.role = Some("SUPER_ADMIN".to_string());
        let err = users
            .create_admin(super_input.clone(), PersonRole::Admin)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::InsufficientRole(_)));

        let created = users
            .create_admin(super_input, PersonRole::SuperAdmin)
            .await
            .unwrap();
        assert_eq!(created.role, PersonRole::SuperAdmin);
    }

    #[tokio::test]
    async fn test_delete_user_removes_row() {
        let repo = repo();
        let admin = RegisterUseCase::new(repo.clone(), config())
            .execute(register_input("gone@x.com"))
            .await
            .unwrap()
            .person;
        let users = ManageUsersUseCase::new(repo.clone(), config());

        users.delete(admin.id, PersonRole::Admin).await.unwrap();
        assert!(repo.get(admin.id).is_none());
        assert!(users.delete(admin.id, PersonRole::Admin).await.is_err());
    }

    #[tokio::test]
    async fn test_admin_cannot_promote_to_super_admin() {
        let repo = repo();
        let admin = RegisterUseCase::new(repo.clone(), config())
            .execute(register_input("plain@x.com"))
            .await
            .unwrap()
            .person;
        let users = ManageUsersUseCase::new(repo.clone(), config());
        let promote = || UpdateUserInput {
            role: Some("SUPER_ADMIN".to_string()),
            ..Default::default()
        };

        let err = users
            .update(admin.id, promote(), PersonRole::Admin)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::InsufficientRole(_)));
        assert_eq!(repo.get(admin.id).unwrap().role, PersonRole::Admin);

        let promoted = users
            .update(admin.id, promote(), PersonRole::SuperAdmin)
            .await
            .unwrap();
        assert_eq!(promoted.role, PersonRole::SuperAdmin);
    }

    #[tokio::test]
    async fn test_admin_cannot_demote_or_delete_super_admin() {
        let repo = repo();
        let mut input = register_input("root@x.com");
        input.role = Some("SUPER_ADMIN".to_string());
        let root = RegisterUseCase::new(repo.clone(), config())
            .execute(input)
            .await
            .unwrap()
            .person;
        let users = ManageUsersUseCase::new(repo.clone(), config());

        let demote = UpdateUserInput {
            role: Some("ADMIN".to_string()),
            ..Default::default()
        };
        let err = users
            .update(root.id, demote, PersonRole::Admin)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::InsufficientRole(_)));

        let err = users.delete(root.id, PersonRole::Admin).await.err().unwrap();
        assert!(matches!(err, AuthError::InsufficientRole(_)));
        assert!(repo.get(root.id).is_some());

        users.delete(root.id, PersonRole::SuperAdmin).await.unwrap();
        assert!(repo.get(root.id).is_none());
    }
}

#[cfg(test)]
mod seller_auth_tests {
    use chrono::{Duration, Utc};

    use super::support::*;
    use crate::application::password_reset::{PASSWORD_RESET_MESSAGE, RESET_REQUESTED_MESSAGE};
    use crate::application::{
        EmailVerificationUseCase, PasswordResetUseCase, SellerLoginInput, SellerLoginUseCase,
        SellerProfileUseCase, SetPasswordInput,
    };
    use crate::domain::entity::person::SellerAuthState;
    use crate::domain::value_object::person_role::PersonRole;
    use crate::domain::value_object::verification_token::VerificationToken;
    use crate::error::AuthError;

    fn login_input(email: &str, password: &str) -> SellerLoginInput {
        SellerLoginInput {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn set_password_input(token: &str, password: &str) -> SetPasswordInput {
        SetPasswordInput {
            token: Some(token.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_full_onboarding_flow_issues_seller_token() {
        let repo = repo();
        let mut person = seller(&repo, "a@x.com").await;
        // 保存されたロールに関わらずトークンは SELLER
        person.role = PersonRole::Admin;
        repo.put(person.clone());
        let token = token_of(&person);

        let verification = EmailVerificationUseCase::new(repo.clone(), config());
        let verified = verification.verify(&token).await.unwrap();
        assert_eq!(verified.id, person.id);
        assert!(!verified.email_verified);

        let output = verification
            .set_password(set_password_input(&token, "secret1"))
            .await
            .unwrap();
        assert!(output.person.email_verified);
        assert!(output.person.verification.is_none());
        assert_eq!(config().tokens.verify(&output.token).unwrap().role, "SELLER");

        let login = SellerLoginUseCase::new(repo.clone(), config())
            .execute(login_input("a@x.com", "secret1"))
            .await
            .unwrap();
        let claims = config().tokens.verify(&login.token).unwrap();
        assert_eq!(claims.role, "SELLER");
        assert_eq!(claims.email.as_deref(), Some("a@x.com"));
    }

    #[tokio::test]
    async fn test_set_password_consumes_token() {
        let repo = repo();
        let person = seller(&repo, "once@x.com").await;
        let token = token_of(&person);
        let verification = EmailVerificationUseCase::new(repo.clone(), config());

        verification
            .set_password(set_password_input(&token, "secret1"))
            .await
            .unwrap();
        let err = verification
            .set_password(set_password_input(&token, "secret2"))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AuthError::InvalidVerificationToken));
        assert_eq!(err.to_string(), "Token inválido ou expirado");
        assert_eq!(
            repo.get(person.id).unwrap().seller_auth_state(),
            SellerAuthState::Verified
        );
    }

    #[tokio::test]
    async fn test_unknown_and_expired_tokens_fail() {
        let repo = repo();
        let mut person = seller(&repo, "late@x.com").await;
        let verification = EmailVerificationUseCase::new(repo.clone(), config());

        assert!(verification.verify("deadbeef").await.is_err());

        person.verification = Some(VerificationToken::from_db(
            "expired-token",
            Utc::now() - Duration::seconds(1),
        ));
        repo.put(person);
        let err = verification.verify("expired-token").await.err().unwrap();
        assert_eq!(err.kind().status_code(), 400);
    }

    #[tokio::test]
    async fn test_set_password_min_length() {
        let repo = repo();
        let person = seller(&repo, "short@x.com").await;

        let err = EmailVerificationUseCase::new(repo.clone(), config())
            .set_password(set_password_input(&token_of(&person), "12345"))
            .await
            .err()
            .unwrap();
        assert_eq!(message_of(err), "Senha deve ter no mínimo 6 caracteres");
        assert!(repo.get(person.id).unwrap().verification.is_some());
    }

    #[tokio::test]
    async fn test_seller_login_differentiates_states() {
        let repo = repo();
        let person = seller(&repo, "state@x.com").await;
        let login = SellerLoginUseCase::new(repo.clone(), config());

        let err = login
            .execute(login_input("state@x.com", "secret1"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::EmailNotVerified));

        let mut verified_without_password = person.clone();
        verified_without_password.email_verified = true;
        repo.put(verified_without_password);
        let err = login
            .execute(login_input("state@x.com", "secret1"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::PasswordNotSet));

        let mut inactive = person.clone();
        inactive.active = false;
        repo.put(inactive);
        let err = login
            .execute(login_input("state@x.com", "secret1"))
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Conta desativada");

        let err = login
            .execute(login_input("nobody@x.com", "secret1"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_password_reset_cycle() {
        let repo = repo();
        let person = seller(&repo, "reset@x.com").await;
        EmailVerificationUseCase::new(repo.clone(), config())
            .set_password(set_password_input(&token_of(&person), "secret1"))
            .await
            .unwrap();

        let reset = PasswordResetUseCase::new(repo.clone(), config());
        let message = reset.request(Some("reset@x.com".to_string())).await.unwrap();
        assert_eq!(message, RESET_REQUESTED_MESSAGE);

        let pending = repo.get(person.id).unwrap();
        assert_eq!(pending.seller_auth_state(), SellerAuthState::ResetPending);
        let reset_token = token_of(&pending);
        let expires_in = pending.verification.as_ref().unwrap().expires_at() - Utc::now();
        assert!(expires_in <= Duration::hours(1));
        assert!(expires_in > Duration::minutes(59));

        let message = reset
            .reset(Some(reset_token.clone()), Some("secret2".to_string()))
            .await
            .unwrap();
        assert_eq!(message, PASSWORD_RESET_MESSAGE);

        let after = repo.get(person.id).unwrap();
        assert_eq!(after.seller_auth_state(), SellerAuthState::Verified);
        assert!(after.email_verified);
        assert!(reset.reset(Some(reset_token), Some("secret3".to_string())).await.is_err());

        let login = SellerLoginUseCase::new(repo.clone(), config());
        assert!(login.execute(login_input("reset@x.com", "secret2")).await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_request_does_not_reveal_unknown_email() {
        let reset = PasswordResetUseCase::new(repo(), config());
        let message = reset.request(Some("ghost@x.com".to_string())).await.unwrap();
        assert_eq!(message, RESET_REQUESTED_MESSAGE);

        let err = reset.request(None).await.err().unwrap();
        assert_eq!(message_of(err), "Email é obrigatório");
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let err = SellerProfileUseCase::new(repo())
            .execute(kernel::id::PersonId::new())
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Vendedor não encontrado");
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::infra::memory::InMemoryPersonRepository;
    use crate::presentation::router::{auth_router, seller_auth_router};

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn app(repo: &InMemoryPersonRepository) -> Router {
        auth_router(repo.clone(), config())
    }

    async fn register(repo: &InMemoryPersonRepository, email: &str) -> String {
        let (status, body) = send(
            app(repo),
            post_json(
                "/register",
                json!({ "name": "Admin", "email": email, "password": "secret1" }),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_envelope() {
        let repo = InMemoryPersonRepository::new();
        let (status, body) = send(
            app(&repo),
            post_json(
                "/register",
                json!({ "name": "Admin", "email": "admin@x.com", "password": "secret1" }),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["email"], "admin@x.com");
        assert_eq!(body["data"]["user"]["role"], "ADMIN");
        assert!(body["data"]["user"].get("passwordHash").is_none());

        let (status, body) = send(
            app(&repo),
            post_json(
                "/register",
                json!({ "name": "Admin", "email": "admin@x.com", "password": "secret1" }),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "success": false, "message": "Email já cadastrado" }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let repo = InMemoryPersonRepository::new();
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(app(&repo), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_bearer_guard_messages() {
        let repo = InMemoryPersonRepository::new();

        let (status, body) = send(app(&repo), get("/users", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Token não fornecido");

        let (status, body) = send(app(&repo), get("/users", Some("Token abc"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Formato de token inválido");

        let (status, body) = send(app(&repo), get("/users", Some("Bearer abc"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Token inválido ou expirado");
    }

    #[tokio::test]
    async fn test_admin_routes_reject_seller_tokens() {
        let repo = InMemoryPersonRepository::new();
        let person = seller(&repo, "seller@x.com").await;
        let token = config()
            .tokens
            .issue(&person.id.to_string(), Some("seller@x.com"), "SELLER")
            .unwrap();

        let (status, body) = send(
            app(&repo),
            get("/users", Some(&format!("Bearer {token}"))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["message"],
            "Acesso negado. Apenas administradores podem acessar este recurso."
        );
    }

    #[tokio::test]
    async fn test_admin_can_list_and_create_users() {
        let repo = InMemoryPersonRepository::new();
        let token = register(&repo, "admin@x.com").await;

        let (status, body) = send(
            app(&repo),
            post_json(
                "/admin/users",
                json!({ "name": "Other", "email": "other@x.com", "password": "secret1" }),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["email"], "other@x.com");

        let (status, body) = send(
            app(&repo),
            get("/users", Some(&format!("Bearer {token}"))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (status, body) = send(
            app(&repo),
            get("/users/not-a-uuid", Some(&format!("Bearer {token}"))),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Usuário não encontrado");
    }

    #[tokio::test]
    async fn test_admin_cannot_promote_itself() {
        let repo = InMemoryPersonRepository::new();
        let token = register(&repo, "admin@x.com").await;
        let bearer = format!("Bearer {token}");

        let (_, body) = send(app(&repo), get("/users", Some(&bearer))).await;
        let id = body["data"][0]["id"].as_str().unwrap().to_string();

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/users/{id}"))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, &bearer)
            .body(Body::from(json!({ "role": "SUPER_ADMIN" }).to_string()))
            .unwrap();
        let (status, body) = send(app(&repo), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Apenas SUPER_ADMIN pode gerenciar um SUPER_ADMIN");

        let (_, body) = send(app(&repo), get(&format!("/users/{id}"), Some(&bearer))).await;
        assert_eq!(body["data"]["role"], "ADMIN");
    }

    #[tokio::test]
    async fn test_seller_routes() {
        let repo = InMemoryPersonRepository::new();
        let person = seller(&repo, "flow@x.com").await;
        let seller_app = || seller_auth_router(repo.clone(), config());

        let (status, body) = send(
            seller_app(),
            get(&format!("/verify/{}", token_of(&person)), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["emailVerified"], false);

        let (status, body) = send(
            seller_app(),
            post_json(
                "/set-password",
                json!({ "token": token_of(&person), "password": "secret1" }),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["person"]["emailVerified"], true);

        let (status, body) = send(
            seller_app(),
            post_json(
                "/login",
                json!({ "email": "flow@x.com", "password": "secret1" }),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["token"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["person"]["qrCode"], person.qr_code.as_str());

        let (status, body) = send(
            seller_app(),
            get("/profile", Some(&format!("Bearer {token}"))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "flow@x.com");
        assert_eq!(body["data"]["scanCount"], 0);

        let admin_token = register(&repo, "admin@x.com").await;
        let (status, body) = send(
            seller_app(),
            get("/profile", Some(&format!("Bearer {admin_token}"))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["message"],
            "Acesso negado. Apenas vendedores podem acessar este recurso."
        );
    }

    #[tokio::test]
    async fn test_forgot_password_always_succeeds() {
        let repo = InMemoryPersonRepository::new();
        let (status, body) = send(
            seller_auth_router(repo.clone(), config()),
            post_json("/forgot-password", json!({ "email": "ghost@x.com" }), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["message"],
            "Se o email existir, um link de redefinição será enviado."
        );
    }
}
