//! API DTOs (Data Transfer Objects)
//!
//! Request bodies keep every field optional so that presence checks produce
//! the same "{campo} é obrigatório" messages as the use cases.

use chrono::{DateTime, Utc};
use kernel::id::PersonId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::person::Person;
use crate::domain::value_object::person_role::PersonRole;

// ============================================================================
// Admin auth
// ============================================================================

/// Register / create-admin request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Login request (admin and seller)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Partial administrator update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

/// Administrator projection (never includes the password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: PersonId,
    pub email: Option<String>,
    pub name: String,
    pub role: PersonRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Person> for UserResponse {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id,
            email: person.email_str().map(str::to_string),
            name: person.name.clone(),
            role: person.role,
            active: person.active,
            created_at: person.created_at,
        }
    }
}

/// `{ user, token }`
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokenResponse {
    pub user: UserResponse,
    pub token: String,
}

// ============================================================================
// Seller auth
// ============================================================================

/// Seller projection returned on login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerSessionPerson {
    pub id: PersonId,
    pub email: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub qr_code: String,
}

impl From<&Person> for SellerSessionPerson {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id,
            email: person.email_str().map(str::to_string),
            name: person.name.clone(),
            phone: person.phone.clone(),
            photo_url: person.photo_url.clone(),
            qr_code: person.qr_code.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SellerLoginResponse {
    pub person: SellerSessionPerson,
    pub token: String,
}

/// Result of a verification-token lookup
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedPerson {
    pub id: PersonId,
    pub name: String,
    pub email: Option<String>,
    pub email_verified: bool,
}

impl From<&Person> for VerifiedPerson {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            email: person.email_str().map(str::to_string),
            email_verified: person.email_verified,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SetPasswordResponse {
    pub person: VerifiedPerson,
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetPasswordRequest {
    pub token: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub password: Option<String>,
}

/// `{ message }` payload for flows that only report an outcome
#[derive(Debug, Clone, Serialize)]
pub struct MessageData {
    pub message: &'static str,
}

/// Seller self-view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerProfileResponse {
    pub id: PersonId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub qr_code: String,
    pub qr_code_url: Option<String>,
    pub scan_count: i32,
    pub active: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Person> for SellerProfileResponse {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            email: person.email_str().map(str::to_string),
            phone: person.phone.clone(),
            photo_url: person.photo_url.clone(),
            qr_code: person.qr_code.as_str().to_string(),
            qr_code_url: person.qr_code_url.clone(),
            scan_count: person.scan_count,
            active: person.active,
            email_verified: person.email_verified,
            created_at: person.created_at,
        }
    }
}
