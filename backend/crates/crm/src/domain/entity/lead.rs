//! Lead Entity
//!
//! A prospect captured for a seller, either through the public QR form or
//! by an administrator.

use chrono::{DateTime, Utc};
use kernel::id::{LeadId, PersonId};

use crate::domain::value_object::lead_status::LeadStatus;

#[derive(Debug, Clone)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// URL of an uploaded energy bill
    pub energy_bill: Option<String>,
    /// URL of an uploaded roof photo
    pub roof_photo: Option<String>,
    pub notes: Option<String>,
    pub status: LeadStatus,
    pub owner_id: PersonId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional lead fields
#[derive(Debug, Clone, Default)]
pub struct LeadDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub energy_bill: Option<String>,
    pub roof_photo: Option<String>,
    pub notes: Option<String>,
}

impl Lead {
    /// 新しい Lead（常に NEGOTIATION から開始）
    pub fn new(name: String, details: LeadDetails, owner_id: PersonId, now: DateTime<Utc>) -> Self {
        Self {
            id: LeadId::new(),
            name,
            email: details.email,
            phone: details.phone,
            energy_bill: details.energy_bill,
            roof_photo: details.roof_photo,
            notes: details.notes,
            status: LeadStatus::default(),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: LeadStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}

/// Owner fields joined onto lead listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id: PersonId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LeadWithOwner {
    pub lead: Lead,
    pub owner: OwnerSummary,
}
