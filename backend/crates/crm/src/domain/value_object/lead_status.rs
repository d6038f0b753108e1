use serde::{Deserialize, Serialize};
use std::fmt;

/// Lead の商談状況
///
/// 遷移に制約はなく、どの状態からどの状態へも変更できます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    #[default]
    Negotiation,
    Bought,
    Cancelled,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 3] = [
        LeadStatus::Negotiation,
        LeadStatus::Bought,
        LeadStatus::Cancelled,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            LeadStatus::Negotiation => "NEGOTIATION",
            LeadStatus::Bought => "BOUGHT",
            LeadStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
