//! API DTOs (Data Transfer Objects)
//!
//! Request bodies keep every field optional; presence checks happen in the
//! use cases so the messages match across transports.

use auth::Person;
use auth::models::person_role::PersonRole;
use chrono::{DateTime, Utc};
use kernel::id::{LeadId, PersonId, QrCodeScanId};
use serde::{Deserialize, Serialize};

use crate::application::{
    ActivityCounts, CreateLeadInput, CreatePersonInput, PersonDetail, PersonStats,
    PersonWithCounts, UpdateLeadInput, UpdatePersonInput,
};
use crate::domain::entity::lead::{Lead, LeadWithOwner, OwnerSummary};
use crate::domain::entity::scan::QrCodeScan;
use crate::domain::value_object::{lead_status::LeadStatus, stats::LeadCounts};

// ============================================================================
// Persons
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pix_key: Option<String>,
    pub photo_url: Option<String>,
}

impl From<CreatePersonRequest> for CreatePersonInput {
    fn from(req: CreatePersonRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            pix_key: req.pix_key,
            photo_url: req.photo_url,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pix_key: Option<String>,
    pub photo_url: Option<String>,
    pub active: Option<bool>,
}

impl From<UpdatePersonRequest> for UpdatePersonInput {
    fn from(req: UpdatePersonRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            pix_key: req.pix_key,
            photo_url: req.photo_url,
            active: req.active,
        }
    }
}

/// `GET /api/person?active=true`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonListQuery {
    pub active: Option<String>,
}

impl PersonListQuery {
    pub fn active_only(&self) -> bool {
        self.active.as_deref() == Some("true")
    }
}

/// `_count` block of the person views
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountsResponse {
    pub leads: i64,
    pub qr_code_scans: i64,
}

impl From<ActivityCounts> for CountsResponse {
    fn from(counts: ActivityCounts) -> Self {
        Self {
            leads: counts.leads,
            qr_code_scans: counts.scans,
        }
    }
}

/// Seller projection for administrators (no password hash, no token)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: PersonId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pix_key: Option<String>,
    pub photo_url: Option<String>,
    pub role: PersonRole,
    pub active: bool,
    pub qr_code: String,
    pub qr_code_url: Option<String>,
    pub scan_count: i32,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_count", skip_serializing_if = "Option::is_none")]
    pub counts: Option<CountsResponse>,
}

impl From<&Person> for PersonResponse {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            email: person.email_str().map(str::to_string),
            phone: person.phone.clone(),
            pix_key: person.pix_key.clone(),
            photo_url: person.photo_url.clone(),
            role: person.role,
            active: person.active,
            qr_code: person.qr_code.as_str().to_string(),
            qr_code_url: person.qr_code_url.clone(),
            scan_count: person.scan_count,
            email_verified: person.email_verified,
            created_at: person.created_at,
            updated_at: person.updated_at,
            counts: None,
        }
    }
}

impl PersonResponse {
    pub fn with_counts(mut self, counts: ActivityCounts) -> Self {
        self.counts = Some(counts.into());
        self
    }
}

impl From<&PersonWithCounts> for PersonResponse {
    fn from(row: &PersonWithCounts) -> Self {
        PersonResponse::from(&row.person).with_counts(row.counts)
    }
}

/// Seller with leads and recent scans
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetailResponse {
    #[serde(flatten)]
    pub person: PersonResponse,
    pub leads: Vec<LeadSummary>,
    pub qr_code_scans: Vec<ScanResponse>,
}

impl From<&PersonDetail> for PersonDetailResponse {
    fn from(detail: &PersonDetail) -> Self {
        Self {
            person: PersonResponse::from(&detail.person).with_counts(detail.counts),
            leads: detail.leads.iter().map(LeadSummary::from).collect(),
            qr_code_scans: detail.scans.iter().map(ScanResponse::from).collect(),
        }
    }
}

/// Public projection behind `GET /api/person/qr/{qrCode}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPersonResponse {
    pub id: PersonId,
    pub name: String,
    pub qr_code: String,
    pub active: bool,
}

impl From<&Person> for PublicPersonResponse {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            qr_code: person.qr_code.as_str().to_string(),
            active: person.active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonStatsResponse {
    pub id: PersonId,
    pub name: String,
    pub scan_count: i64,
    pub leads: LeadCounts,
    pub conversion_rate: String,
}

impl From<&PersonStats> for PersonStatsResponse {
    fn from(stats: &PersonStats) -> Self {
        Self {
            id: stats.person.id,
            name: stats.person.name.clone(),
            scan_count: stats.scan_count,
            leads: stats.leads,
            conversion_rate: stats.leads.conversion_rate(),
        }
    }
}

// ============================================================================
// Leads
// ============================================================================

/// Lead form (public QR form and admin creation)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub energy_bill: Option<String>,
    pub roof_photo: Option<String>,
    pub notes: Option<String>,
    /// Admin creation only; ignored by the public form
    pub owner_id: Option<String>,
}

impl From<CreateLeadRequest> for CreateLeadInput {
    fn from(req: CreateLeadRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            energy_bill: req.energy_bill,
            roof_photo: req.roof_photo,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub energy_bill: Option<String>,
    pub roof_photo: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

impl From<UpdateLeadRequest> for UpdateLeadInput {
    fn from(req: UpdateLeadRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            energy_bill: req.energy_bill,
            roof_photo: req.roof_photo,
            notes: req.notes,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// `GET /api/lead?status=&ownerId=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadListQuery {
    pub status: Option<String>,
    pub owner_id: Option<String>,
}

/// `GET /api/lead/new?days=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLeadsQuery {
    pub days: Option<i64>,
}

/// `GET /api/seller/my-leads?status=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SellerLeadsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub id: PersonId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl OwnerResponse {
    /// `{ id, name }` used by listings
    pub fn brief(owner: &OwnerSummary) -> Self {
        Self {
            id: owner.id,
            name: owner.name.clone(),
            email: None,
            phone: None,
        }
    }

    /// `{ id, name, email, phone }` used by the detail view
    pub fn full(owner: &OwnerSummary) -> Self {
        Self {
            email: owner.email.clone(),
            phone: owner.phone.clone(),
            ..Self::brief(owner)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub id: LeadId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub energy_bill: Option<String>,
    pub roof_photo: Option<String>,
    pub notes: Option<String>,
    pub status: LeadStatus,
    pub owner_id: PersonId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerResponse>,
}

impl From<&Lead> for LeadResponse {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            energy_bill: lead.energy_bill.clone(),
            roof_photo: lead.roof_photo.clone(),
            notes: lead.notes.clone(),
            status: lead.status,
            owner_id: lead.owner_id,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
            owner: None,
        }
    }
}

impl LeadResponse {
    pub fn listed(row: &LeadWithOwner) -> Self {
        Self {
            owner: Some(OwnerResponse::brief(&row.owner)),
            ..Self::from(&row.lead)
        }
    }

    pub fn detailed(row: &LeadWithOwner) -> Self {
        Self {
            owner: Some(OwnerResponse::full(&row.owner)),
            ..Self::from(&row.lead)
        }
    }
}

/// Minimal view behind `GET /api/lead/owner/{ownerId}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerLeadResponse {
    pub id: LeadId,
    pub name: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Lead> for OwnerLeadResponse {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name.clone(),
            status: lead.status,
            created_at: lead.created_at,
        }
    }
}

/// Contact view used by the seller area and the person detail
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummary {
    pub id: LeadId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Lead> for LeadSummary {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            status: lead.status,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

/// `{ total, bought, negotiation, cancelled, conversionRate }`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStatsResponse {
    #[serde(flatten)]
    pub counts: LeadCounts,
    pub conversion_rate: String,
}

impl From<LeadCounts> for LeadStatsResponse {
    fn from(counts: LeadCounts) -> Self {
        Self {
            counts,
            conversion_rate: counts.conversion_rate(),
        }
    }
}

// ============================================================================
// QR codes
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub id: QrCodeScanId,
    pub person_id: PersonId,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub scanned_at: DateTime<Utc>,
}

impl From<&QrCodeScan> for ScanResponse {
    fn from(scan: &QrCodeScan) -> Self {
        Self {
            id: scan.id,
            person_id: scan.person_id,
            ip_address: scan.ip_address.clone(),
            user_agent: scan.user_agent.clone(),
            scanned_at: scan.scanned_at,
        }
    }
}

/// Answer to a public scan
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanAccepted {
    pub person_id: PersonId,
    pub person_name: String,
    pub message: &'static str,
}

impl From<&Person> for ScanAccepted {
    fn from(person: &Person) -> Self {
        Self {
            person_id: person.id,
            person_name: person.name.clone(),
            message: "QR Code escaneado com sucesso",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatsQuery {
    pub person_id: Option<String>,
}

// ============================================================================
// Uploads
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub url: String,
}
