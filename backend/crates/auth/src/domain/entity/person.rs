//! Person Entity
//!
//! One entity for administrators and sellers, distinguished by
//! [`PersonRole`]. Seller-only fields (QR image, scan counter, verification
//! token) are optional or zero for admins.

use chrono::{DateTime, Utc};
use kernel::id::PersonId;

use crate::domain::value_object::{
    email::Email, person_password::PersonPassword, person_role::PersonRole, qr_code::QrCode,
    verification_token::{TokenPurpose, VerificationToken},
};

/// 販売者アカウントの認証準備状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerAuthState {
    /// QR コードのみ、パスワード未設定、メール未確認
    Created,
    /// メール確認済みでパスワード設定済み
    Verified,
    /// 確認済みアカウントにリセット用トークンが発行されている
    ResetPending,
}

#[derive(Debug, Clone)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Nullable for legacy admin-only rows
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub pix_key: Option<String>,
    pub photo_url: Option<String>,
    /// Absent until the seller completes verification
    pub password_hash: Option<PersonPassword>,
    pub role: PersonRole,
    pub active: bool,
    pub qr_code: QrCode,
    pub qr_code_url: Option<String>,
    pub scan_count: i32,
    pub email_verified: bool,
    pub verification: Option<VerificationToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional contact fields shared by seller creation and profile updates
#[derive(Debug, Clone, Default)]
pub struct ContactDetails {
    pub phone: Option<String>,
    pub pix_key: Option<String>,
    pub photo_url: Option<String>,
}

impl Person {
    /// 新しい販売者（パスワード未設定、メール確認前）
    ///
    /// メールがある場合は 24 時間有効の確認トークンを発行します。
    pub fn new_seller(
        name: String,
        email: Option<Email>,
        contact: ContactDetails,
        now: DateTime<Utc>,
    ) -> Self {
        let verification = email
            .as_ref()
            .map(|_| VerificationToken::generate(TokenPurpose::EmailVerification, now));

        Self {
            id: PersonId::new(),
            name,
            email,
            phone: contact.phone,
            pix_key: contact.pix_key,
            photo_url: contact.photo_url,
            password_hash: None,
            role: PersonRole::Seller,
            active: true,
            qr_code: QrCode::for_seller(now),
            qr_code_url: None,
            scan_count: 0,
            email_verified: false,
            verification,
            created_at: now,
            updated_at: now,
        }
    }

    /// 新しい管理者（登録時点でメール確認済み扱い）
    pub fn new_admin(
        name: String,
        email: Email,
        password_hash: PersonPassword,
        role: PersonRole,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PersonId::new(),
            name,
            email: Some(email),
            phone: None,
            pix_key: None,
            photo_url: None,
            password_hash: Some(password_hash),
            role,
            active: true,
            qr_code: QrCode::for_admin(now),
            qr_code_url: None,
            scan_count: 0,
            email_verified: true,
            verification: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn seller_auth_state(&self) -> SellerAuthState {
        match (self.email_verified && self.password_hash.is_some(), &self.verification) {
            (false, _) => SellerAuthState::Created,
            (true, Some(_)) => SellerAuthState::ResetPending,
            (true, None) => SellerAuthState::Verified,
        }
    }

    /// トークンが一致し、期限内であるか
    pub fn has_valid_token(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.verification
            .as_ref()
            .is_some_and(|t| t.matches(token, now))
    }

    /// パスワード初回設定（メール確認を完了し、トークンを消費する）
    pub fn complete_verification(&mut self, password_hash: PersonPassword, now: DateTime<Utc>) {
        self.password_hash = Some(password_hash);
        self.email_verified = true;
        self.verification = None;
        self.updated_at = now;
    }

    /// パスワードリセット用トークンを発行し、その値を返す
    pub fn begin_password_reset(&mut self, now: DateTime<Utc>) -> &VerificationToken {
        self.updated_at = now;
        self.verification
            .insert(VerificationToken::generate(TokenPurpose::PasswordReset, now))
    }

    /// パスワードを置き換えてトークンを消費する（email_verified は変更しない）
    pub fn reset_password(&mut self, password_hash: PersonPassword, now: DateTime<Utc>) {
        self.password_hash = Some(password_hash);
        self.verification = None;
        self.updated_at = now;
    }

    pub fn set_password(&mut self, password_hash: PersonPassword, now: DateTime<Utc>) {
        self.password_hash = Some(password_hash);
        self.updated_at = now;
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = now;
    }

    pub fn email_str(&self) -> Option<&str> {
        self.email.as_ref().map(Email::as_str)
    }
}
