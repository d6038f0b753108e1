//! QR Code Value Object
//!
//! Opaque, unique token printed in a seller's QR image and used to resolve
//! the seller on the public lead form.

use chrono::{DateTime, Utc};
use platform::crypto::random_base36;
use serde::{Deserialize, Serialize};
use std::fmt;

const SELLER_PREFIX: &str = "QR";
const ADMIN_PREFIX: &str = "ADMIN";
const RANDOM_SUFFIX_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QrCode(String);

impl QrCode {
    /// `QR-<epoch millis>-<9 base36 chars>`
    pub fn for_seller(now: DateTime<Utc>) -> Self {
        Self::generate(SELLER_PREFIX, now)
    }

    /// 管理者用の合成コード（QR 画像は発行しない）
    pub fn for_admin(now: DateTime<Utc>) -> Self {
        Self::generate(ADMIN_PREFIX, now)
    }

    fn generate(prefix: &str, now: DateTime<Utc>) -> Self {
        Self(format!(
            "{}-{}-{}",
            prefix,
            now.timestamp_millis(),
            random_base36(RANDOM_SUFFIX_LEN)
        ))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seller_code_shape() {
        let now = Utc::now();
        let code = QrCode::for_seller(now);
        let parts: Vec<&str> = code.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "QR");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_codes_are_unique() {
        let now = Utc::now();
        assert_ne!(QrCode::for_seller(now), QrCode::for_seller(now));
        assert!(QrCode::for_admin(now).as_str().starts_with("ADMIN-"));
    }
}
