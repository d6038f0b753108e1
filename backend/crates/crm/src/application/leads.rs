//! Lead Use Cases
//!
//! Administrator lead management plus the seller-scoped views. Status
//! changes are unrestricted: any status may follow any other.

use std::sync::Arc;

use auth::PersonRepository;
use chrono::{DateTime, Duration, Utc};
use kernel::id::{LeadId, PersonId};
use kernel::validation;

use crate::application::person_directory::non_blank;
use crate::domain::entity::lead::{Lead, LeadDetails, LeadWithOwner};
use crate::domain::repository::{LeadFilter, LeadRepository};
use crate::domain::value_object::{lead_status::LeadStatus, stats::LeadCounts};
use crate::error::{CrmError, CrmResult};

const LEAD: &str = "Lead";

/// Default look-back window of the "new leads" view
pub const DEFAULT_NEW_LEADS_DAYS: i64 = 7;

#[derive(Debug, Clone, Default)]
pub struct CreateLeadInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub energy_bill: Option<String>,
    pub roof_photo: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateLeadInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub energy_bill: Option<String>,
    pub roof_photo: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

/// Parse a wire status code
pub fn parse_status(code: &str) -> CrmResult<LeadStatus> {
    LeadStatus::from_code(code.trim()).ok_or(CrmError::InvalidStatus)
}

/// Lead use cases
pub struct LeadUseCase<P, C>
where
    P: PersonRepository,
    C: LeadRepository,
{
    persons: Arc<P>,
    records: Arc<C>,
}

impl<P, C> LeadUseCase<P, C>
where
    P: PersonRepository,
    C: LeadRepository,
{
    pub fn new(persons: Arc<P>, records: Arc<C>) -> Self {
        Self { persons, records }
    }

    /// Create a lead for `owner_id`; the owner must exist and be active
    pub async fn create(&self, owner_id: PersonId, input: CreateLeadInput) -> CrmResult<LeadWithOwner> {
        validation::required(input.name.as_deref(), "Nome")?;

        let owner = self
            .persons
            .find_by_id(owner_id)
            .await?
            .ok_or(CrmError::NotFound("Vendedor"))?;
        if !owner.active {
            return Err(CrmError::SellerDisabled);
        }

        let details = LeadDetails {
            email: non_blank(input.email),
            phone: non_blank(input.phone),
            energy_bill: non_blank(input.energy_bill),
            roof_photo: non_blank(input.roof_photo),
            notes: non_blank(input.notes),
        };
        let name = input.name.unwrap_or_default().trim().to_string();
        let lead = Lead::new(name, details, owner.id, Utc::now());
        self.records.create_lead(&lead).await?;

        tracing::info!(lead_id = %lead.id, owner_id = %owner.id, "Lead created");

        self.get(lead.id).await
    }

    pub async fn list(&self, filter: &LeadFilter) -> CrmResult<Vec<LeadWithOwner>> {
        self.records.list_leads(filter).await
    }

    pub async fn list_by_owner(&self, owner_id: PersonId) -> CrmResult<Vec<Lead>> {
        let rows = self.records.list_leads(&LeadFilter::owned_by(owner_id)).await?;
        Ok(rows.into_iter().map(|row| row.lead).collect())
    }

    pub async fn get(&self, id: LeadId) -> CrmResult<LeadWithOwner> {
        self.records
            .find_lead(id)
            .await?
            .ok_or(CrmError::NotFound(LEAD))
    }

    pub async fn update(&self, id: LeadId, input: UpdateLeadInput) -> CrmResult<LeadWithOwner> {
        let mut lead = self.get(id).await?.lead;

        if let Some(name) = input.name {
            validation::required(Some(name.as_str()), "Nome")?;
            lead.name = name.trim().to_string();
        }
        if let Some(email) = input.email {
            lead.email = Some(email);
        }
        if let Some(phone) = input.phone {
            lead.phone = Some(phone);
        }
        if let Some(energy_bill) = input.energy_bill {
            lead.energy_bill = Some(energy_bill);
        }
        if let Some(roof_photo) = input.roof_photo {
            lead.roof_photo = Some(roof_photo);
        }
        if let Some(notes) = input.notes {
            lead.notes = Some(notes);
        }
        if let Some(status) = input.status {
            lead.status = parse_status(&status)?;
        }
        lead.updated_at = Utc::now();

        self.save(&lead).await?;
        self.get(id).await
    }

    pub async fn update_status(&self, id: LeadId, status: Option<String>) -> CrmResult<Lead> {
        validation::required(status.as_deref(), "Status")?;
        let status = parse_status(&status.unwrap_or_default())?;

        let mut lead = self.get(id).await?.lead;
        let previous = lead.status;
        lead.set_status(status, Utc::now());
        self.save(&lead).await?;

        tracing::info!(lead_id = %lead.id, from = %previous, to = %status, "Lead status changed");

        Ok(lead)
    }

    pub async fn delete(&self, id: LeadId) -> CrmResult<LeadWithOwner> {
        let lead = self.get(id).await?;
        if !self.records.delete_lead(id).await? {
            return Err(CrmError::NotFound(LEAD));
        }

        tracing::info!(lead_id = %id, "Lead deleted");

        Ok(lead)
    }

    pub async fn stats(&self) -> CrmResult<LeadCounts> {
        self.records.lead_counts(None).await
    }

    /// Leads created within the last `days` days (cutoff inclusive)
    ///
    /// A window reaching past chrono's range has no lower bound.
    pub async fn new_leads(&self, days: i64) -> CrmResult<Vec<LeadWithOwner>> {
        let filter = LeadFilter {
            created_since: new_leads_cutoff(Utc::now(), days),
            ..LeadFilter::default()
        };
        self.records.list_leads(&filter).await
    }

    // ------------------------------------------------------------------------
    // Seller-scoped views (owner is always the caller)
    // ------------------------------------------------------------------------

    pub async fn seller_leads(
        &self,
        seller_id: PersonId,
        status: Option<LeadStatus>,
    ) -> CrmResult<Vec<Lead>> {
        let filter = LeadFilter {
            status,
            ..LeadFilter::owned_by(seller_id)
        };
        let rows = self.records.list_leads(&filter).await?;
        Ok(rows.into_iter().map(|row| row.lead).collect())
    }

    /// Another seller's lead is reported as missing
    pub async fn seller_lead(&self, seller_id: PersonId, id: LeadId) -> CrmResult<Lead> {
        self.records
            .find_lead(id)
            .await?
            .map(|row| row.lead)
            .filter(|lead| lead.owner_id == seller_id)
            .ok_or(CrmError::NotFound(LEAD))
    }

    pub async fn seller_stats(&self, seller_id: PersonId) -> CrmResult<LeadCounts> {
        self.records.lead_counts(Some(seller_id)).await
    }

    async fn save(&self, lead: &Lead) -> CrmResult<()> {
        if !self.records.update_lead(lead).await? {
            return Err(CrmError::NotFound(LEAD));
        }
        Ok(())
    }
}

fn new_leads_cutoff(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    Duration::try_days(days).and_then(|window| now.checked_sub_signed(window))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_leads_cutoff_saturates() {
        let now = Utc::now();
        assert_eq!(new_leads_cutoff(now, 7), Some(now - Duration::days(7)));
        assert_eq!(new_leads_cutoff(now, 0), Some(now));
        assert_eq!(new_leads_cutoff(now, 1_000_000_000), None);
        assert_eq!(new_leads_cutoff(now, i64::MAX), None);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(" BOUGHT ").unwrap(), LeadStatus::Bought);
        assert!(matches!(parse_status("WON"), Err(CrmError::InvalidStatus)));
    }
}
