//! In-memory lead/scan store for unit and router tests
//!
//! Shares the person store so that owner summaries and the scan counter
//! behave like the PostgreSQL join and transaction.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use auth::InMemoryPersonRepository;
use chrono::{DateTime, Utc};
use kernel::id::{LeadId, PersonId};

use crate::domain::entity::lead::{Lead, LeadWithOwner, OwnerSummary};
use crate::domain::entity::scan::QrCodeScan;
use crate::domain::repository::{LeadFilter, LeadRepository, ScanRepository};
use crate::domain::value_object::stats::LeadCounts;
use crate::error::{CrmError, CrmResult};

#[derive(Default)]
struct Tables {
    leads: Vec<Lead>,
    scans: Vec<QrCodeScan>,
}

#[derive(Clone)]
pub struct InMemoryCrmRepository {
    persons: InMemoryPersonRepository,
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryCrmRepository {
    pub fn new(persons: InMemoryPersonRepository) -> Self {
        Self {
            persons,
            tables: Arc::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert a lead as-is (tests use this to backdate `created_at`)
    pub fn put_lead(&self, lead: Lead) {
        let mut tables = self.lock();
        tables.leads.retain(|l| l.id != lead.id);
        tables.leads.push(lead);
    }

    /// Insert a scan without touching the counter
    pub fn put_scan(&self, scan: QrCodeScan) {
        self.lock().scans.push(scan);
    }

    pub fn scan_rows(&self) -> usize {
        self.lock().scans.len()
    }

    fn with_owner(&self, lead: Lead) -> Option<LeadWithOwner> {
        let person = self.persons.get(lead.owner_id)?;
        let owner = OwnerSummary {
            id: person.id,
            name: person.name.clone(),
            email: person.email_str().map(str::to_string),
            phone: person.phone.clone(),
        };
        Some(LeadWithOwner { lead, owner })
    }
}

impl LeadRepository for InMemoryCrmRepository {
    async fn create_lead(&self, lead: &Lead) -> CrmResult<()> {
        if self.persons.get(lead.owner_id).is_none() {
            return Err(CrmError::NotFound("Vendedor"));
        }
        self.lock().leads.push(lead.clone());
        Ok(())
    }

    async fn find_lead(&self, id: LeadId) -> CrmResult<Option<LeadWithOwner>> {
        let lead = self.lock().leads.iter().find(|l| l.id == id).cloned();
        Ok(lead.and_then(|lead| self.with_owner(lead)))
    }

    async fn list_leads(&self, filter: &LeadFilter) -> CrmResult<Vec<LeadWithOwner>> {
        let mut leads: Vec<Lead> = self
            .lock()
            .leads
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(leads
            .into_iter()
            .filter_map(|lead| self.with_owner(lead))
            .collect())
    }

    async fn update_lead(&self, lead: &Lead) -> CrmResult<bool> {
        let mut tables = self.lock();
        match tables.leads.iter_mut().find(|l| l.id == lead.id) {
            Some(stored) => {
                *stored = lead.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_lead(&self, id: LeadId) -> CrmResult<bool> {
        let mut tables = self.lock();
        let before = tables.leads.len();
        tables.leads.retain(|l| l.id != id);
        Ok(tables.leads.len() != before)
    }

    async fn lead_counts(&self, owner_id: Option<PersonId>) -> CrmResult<LeadCounts> {
        let tables = self.lock();
        Ok(LeadCounts::tally(
            tables
                .leads
                .iter()
                .filter(|l| owner_id.is_none_or(|o| l.owner_id == o))
                .map(|l| l.status),
        ))
    }

    async fn lead_totals_by_owner(&self) -> CrmResult<HashMap<PersonId, i64>> {
        let mut totals = HashMap::new();
        for lead in &self.lock().leads {
            *totals.entry(lead.owner_id).or_insert(0) += 1;
        }
        Ok(totals)
    }
}

impl ScanRepository for InMemoryCrmRepository {
    async fn record_scan(&self, scan: &QrCodeScan) -> CrmResult<()> {
        let mut tables = self.lock();
        if !self.persons.increment_scan_count(scan.person_id) {
            return Err(CrmError::NotFound("Vendedor"));
        }
        tables.scans.push(scan.clone());
        Ok(())
    }

    async fn recent_scans(&self, person_id: PersonId, limit: i64) -> CrmResult<Vec<QrCodeScan>> {
        let mut scans: Vec<QrCodeScan> = self
            .lock()
            .scans
            .iter()
            .filter(|s| s.person_id == person_id)
            .cloned()
            .collect();
        scans.sort_by(|a, b| b.scanned_at.cmp(&a.scanned_at));
        scans.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(scans)
    }

    async fn count_scans(
        &self,
        person_id: Option<PersonId>,
        since: Option<DateTime<Utc>>,
    ) -> CrmResult<i64> {
        Ok(self
            .lock()
            .scans
            .iter()
            .filter(|s| person_id.is_none_or(|p| s.person_id == p))
            .filter(|s| since.is_none_or(|t| s.scanned_at >= t))
            .count() as i64)
    }

    async fn scan_totals_by_person(&self) -> CrmResult<HashMap<PersonId, i64>> {
        let mut totals = HashMap::new();
        for scan in &self.lock().scans {
            *totals.entry(scan.person_id).or_insert(0) += 1;
        }
        Ok(totals)
    }
}
