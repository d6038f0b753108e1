//! Repository Traits
//!
//! Lead and scan persistence. Persons are owned by the auth context and
//! reached through [`auth::PersonRepository`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{LeadId, PersonId};

use crate::domain::entity::lead::{Lead, LeadWithOwner};
use crate::domain::entity::scan::QrCodeScan;
use crate::domain::value_object::{lead_status::LeadStatus, stats::LeadCounts};
use crate::error::CrmResult;

/// Lead listing filter (results are always newest first)
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub owner_id: Option<PersonId>,
    /// Inclusive lower bound on `created_at`
    pub created_since: Option<DateTime<Utc>>,
}

impl LeadFilter {
    pub fn owned_by(owner_id: PersonId) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        self.status.is_none_or(|s| lead.status == s)
            && self.owner_id.is_none_or(|o| lead.owner_id == o)
            && self.created_since.is_none_or(|since| lead.created_at >= since)
    }
}

/// Lead repository trait
#[trait_variant::make(LeadRepository: Send)]
pub trait LocalLeadRepository {
    async fn create_lead(&self, lead: &Lead) -> CrmResult<()>;

    async fn find_lead(&self, id: LeadId) -> CrmResult<Option<LeadWithOwner>>;

    async fn list_leads(&self, filter: &LeadFilter) -> CrmResult<Vec<LeadWithOwner>>;

    /// Persist every mutable field; returns false if no row existed
    async fn update_lead(&self, lead: &Lead) -> CrmResult<bool>;

    async fn delete_lead(&self, id: LeadId) -> CrmResult<bool>;

    /// Counts by status, optionally for one owner
    async fn lead_counts(&self, owner_id: Option<PersonId>) -> CrmResult<LeadCounts>;

    /// Number of leads per owner (owners without leads are absent)
    async fn lead_totals_by_owner(&self) -> CrmResult<HashMap<PersonId, i64>>;
}

/// QR code scan repository trait
#[trait_variant::make(ScanRepository: Send)]
pub trait LocalScanRepository {
    /// Insert the scan and bump the owner's `scan_count` atomically
    async fn record_scan(&self, scan: &QrCodeScan) -> CrmResult<()>;

    async fn recent_scans(&self, person_id: PersonId, limit: i64) -> CrmResult<Vec<QrCodeScan>>;

    /// Scans at or after `since` (all scans when `None`)
    async fn count_scans(
        &self,
        person_id: Option<PersonId>,
        since: Option<DateTime<Utc>>,
    ) -> CrmResult<i64>;

    /// Number of scans per person (persons without scans are absent)
    async fn scan_totals_by_person(&self) -> CrmResult<HashMap<PersonId, i64>>;
}
