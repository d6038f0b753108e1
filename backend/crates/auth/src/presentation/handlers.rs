//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use kernel::error::app_error::AppError;
use kernel::id::PersonId;
use kernel::response::ApiResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    EmailVerificationUseCase, LoginInput, LoginUseCase, ManageUsersUseCase, PasswordResetUseCase,
    RegisterInput, RegisterUseCase, SellerLoginInput, SellerLoginUseCase, SellerProfileUseCase,
    SetPasswordInput, UpdateUserInput,
};
use crate::domain::repository::PersonRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthTokenResponse, ForgotPasswordRequest, LoginRequest, MessageData, RegisterRequest,
    ResetPasswordRequest, SellerLoginResponse, SellerProfileResponse, SellerSessionPerson,
    SetPasswordRequest, SetPasswordResponse, UpdateUserRequest, UserResponse, VerifiedPerson,
};
use crate::presentation::middleware::CurrentPerson;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

type JsonBody<T> = WithRejection<Json<T>, AppError>;

const USER: &str = "Usuário";

fn user_id(raw: &str) -> AuthResult<PersonId> {
    PersonId::parse(raw).ok_or(AuthError::NotFound(USER))
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

// ============================================================================
// Admin auth
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): JsonBody<RegisterRequest>,
) -> AuthResult<ApiResponse<AuthTokenResponse>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(req.into()).await?;

    Ok(ApiResponse::created(AuthTokenResponse {
        user: UserResponse::from(&output.person),
        token: output.token,
    }))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): JsonBody<LoginRequest>,
) -> AuthResult<ApiResponse<AuthTokenResponse>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok(AuthTokenResponse {
        user: UserResponse::from(&output.person),
        token: output.token,
    }))
}

/// GET /api/auth/users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<ApiResponse<Vec<UserResponse>>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone(), state.config.clone());
    let users = use_case.list().await?;

    Ok(ApiResponse::ok(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/auth/users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<ApiResponse<UserResponse>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.get(user_id(&id)?).await?;

    Ok(ApiResponse::ok(UserResponse::from(&user)))
}

/// PUT /api/auth/users/{id}
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    caller: CurrentPerson,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdateUserRequest>,
) -> AuthResult<ApiResponse<UserResponse>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone(), state.config.clone());
    let input = UpdateUserInput {
        name: req.name,
        email: req.email,
        password: req.password,
        role: req.role,
        active: req.active,
    };
    let user = use_case.update(user_id(&id)?, input, caller.role).await?;

    Ok(ApiResponse::ok(UserResponse::from(&user)))
}

/// DELETE /api/auth/users/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    caller: CurrentPerson,
    Path(id): Path<String>,
) -> AuthResult<ApiResponse<UserResponse>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.delete(user_id(&id)?, caller.role).await?;

    Ok(ApiResponse::ok(UserResponse::from(&user)))
}

/// POST /api/auth/admin/users
pub async fn create_admin_user<R>(
    State(state): State<AuthAppState<R>>,
    caller: CurrentPerson,
    WithRejection(Json(req), _): JsonBody<RegisterRequest>,
) -> AuthResult<ApiResponse<UserResponse>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.create_admin(req.into(), caller.role).await?;

    Ok(ApiResponse::created(UserResponse::from(&user)))
}

// ============================================================================
// Seller auth
// ============================================================================

/// POST /api/seller/login
pub async fn seller_login<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): JsonBody<LoginRequest>,
) -> AuthResult<ApiResponse<SellerLoginResponse>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = SellerLoginUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(SellerLoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok(SellerLoginResponse {
        person: SellerSessionPerson::from(&output.person),
        token: output.token,
    }))
}

/// GET /api/seller/verify/{token}
pub async fn verify_email<R>(
    State(state): State<AuthAppState<R>>,
    Path(token): Path<String>,
) -> AuthResult<ApiResponse<VerifiedPerson>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = EmailVerificationUseCase::new(state.repo.clone(), state.config.clone());
    let person = use_case.verify(&token).await?;

    Ok(ApiResponse::ok(VerifiedPerson::from(&person)))
}

/// POST /api/seller/set-password
pub async fn set_password<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): JsonBody<SetPasswordRequest>,
) -> AuthResult<ApiResponse<SetPasswordResponse>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = EmailVerificationUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .set_password(SetPasswordInput {
            token: req.token,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok(SetPasswordResponse {
        person: VerifiedPerson::from(&output.person),
        token: output.token,
    }))
}

/// POST /api/seller/forgot-password
pub async fn forgot_password<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): JsonBody<ForgotPasswordRequest>,
) -> AuthResult<ApiResponse<MessageData>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(state.repo.clone(), state.config.clone());
    let message = use_case.request(req.email).await?;

    Ok(ApiResponse::ok(MessageData { message }))
}

/// POST /api/seller/reset-password
pub async fn reset_password<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): JsonBody<ResetPasswordRequest>,
) -> AuthResult<ApiResponse<MessageData>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(state.repo.clone(), state.config.clone());
    let message = use_case.reset(req.token, req.password).await?;

    Ok(ApiResponse::ok(MessageData { message }))
}

/// GET /api/seller/profile
pub async fn seller_profile<R>(
    State(state): State<AuthAppState<R>>,
    caller: CurrentPerson,
) -> AuthResult<ApiResponse<SellerProfileResponse>>
where
    R: PersonRepository + Clone + Send + Sync + 'static,
{
    let use_case = SellerProfileUseCase::new(state.repo.clone());
    let person = use_case.execute(caller.id).await?;

    Ok(ApiResponse::ok(SellerProfileResponse::from(&person)))
}
