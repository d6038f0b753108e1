//! Aggregated counters for dashboards

use serde::Serialize;

use super::lead_status::LeadStatus;

/// Lead counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeadCounts {
    pub total: i64,
    pub bought: i64,
    pub negotiation: i64,
    pub cancelled: i64,
}

impl LeadCounts {
    /// Tally a sequence of statuses
    pub fn tally(statuses: impl IntoIterator<Item = LeadStatus>) -> Self {
        statuses.into_iter().fold(Self::default(), |mut counts, status| {
            counts.add(status, 1);
            counts
        })
    }

    pub fn add(&mut self, status: LeadStatus, n: i64) {
        self.total += n;
        match status {
            LeadStatus::Bought => self.bought += n,
            LeadStatus::Negotiation => self.negotiation += n,
            LeadStatus::Cancelled => self.cancelled += n,
        }
    }

    pub fn conversion_rate(&self) -> String {
        conversion_rate(self.bought, self.total)
    }
}

/// `bought / total` as a percentage with two decimals; `"0%"` for no leads
pub fn conversion_rate(bought: i64, total: i64) -> String {
    if total <= 0 {
        return "0%".to_string();
    }
    format!("{:.2}%", bought as f64 / total as f64 * 100.0)
}

/// QR code scan counters over trailing windows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub total: i64,
    /// Since local midnight
    pub today: i64,
    /// Trailing 7 days
    pub this_week: i64,
    /// Trailing 30 days
    pub this_month: i64,
}
