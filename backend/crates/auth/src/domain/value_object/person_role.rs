use serde::{Deserialize, Serialize};
use std::fmt;

/// Person のロール
///
/// 管理者と販売者は同じ Person テーブルに保存され、このタグで区別されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonRole {
    SuperAdmin,
    Admin,
    #[default]
    Seller,
}

impl PersonRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use PersonRole::*;
        match self {
            SuperAdmin => "SUPER_ADMIN",
            Admin => "ADMIN",
            Seller => "SELLER",
        }
    }

    #[inline]
    pub const fn is_admin_or_higher(&self) -> bool {
        matches!(self, PersonRole::Admin | PersonRole::SuperAdmin)
    }

    #[inline]
    pub const fn is_super_admin(&self) -> bool {
        matches!(self, PersonRole::SuperAdmin)
    }

    /// 未知のコードは `None`（呼び出し側でフォールバックを決める）
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use PersonRole::*;
        match code {
            "SUPER_ADMIN" => Some(SuperAdmin),
            "ADMIN" => Some(Admin),
            "SELLER" => Some(Seller),
            _ => None,
        }
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for role in [PersonRole::SuperAdmin, PersonRole::Admin, PersonRole::Seller] {
            assert_eq!(PersonRole::from_code(role.code()), Some(role));
        }
        assert_eq!(PersonRole::from_code("admin"), None);
        assert_eq!(PersonRole::from_code(""), None);
    }

    #[test]
    fn test_admin_or_higher() {
        assert!(PersonRole::SuperAdmin.is_admin_or_higher());
        assert!(PersonRole::Admin.is_admin_or_higher());
        assert!(!PersonRole::Seller.is_admin_or_higher());
    }

    #[test]
    fn test_serde_matches_code() {
        let json = serde_json::to_string(&PersonRole::SuperAdmin).unwrap();
        assert_eq!(json, "\"SUPER_ADMIN\"");
        let role: PersonRole = serde_json::from_str("\"SELLER\"").unwrap();
        assert_eq!(role, PersonRole::Seller);
    }
}
