//! QR Scan Use Cases
//!
//! Public endpoints resolve the seller behind a QR code first; an unknown
//! or deactivated seller stops the request before anything is written.

use std::sync::Arc;

use auth::{Person, PersonRepository};
use chrono::{DateTime, Duration, Local, NaiveTime, Utc};
use kernel::id::PersonId;
use platform::client::ClientInfo;

use crate::application::leads::{CreateLeadInput, LeadUseCase};
use crate::application::person_directory::resolve_active_seller;
use crate::domain::entity::lead::LeadWithOwner;
use crate::domain::entity::scan::QrCodeScan;
use crate::domain::repository::{LeadRepository, ScanRepository};
use crate::domain::value_object::stats::ScanStats;
use crate::error::CrmResult;

/// Scans returned by the per-seller history
pub const SCAN_HISTORY_LIMIT: i64 = 100;

pub struct QrScanUseCase<P, C>
where
    P: PersonRepository,
    C: LeadRepository + ScanRepository,
{
    persons: Arc<P>,
    records: Arc<C>,
}

impl<P, C> QrScanUseCase<P, C>
where
    P: PersonRepository,
    C: LeadRepository + ScanRepository,
{
    pub fn new(persons: Arc<P>, records: Arc<C>) -> Self {
        Self { persons, records }
    }

    /// Record a scan of `qr_code` and return the seller it belongs to
    pub async fn register_scan(&self, qr_code: &str, client: ClientInfo) -> CrmResult<Person> {
        let person = resolve_active_seller(self.persons.as_ref(), qr_code).await?;

        let scan = QrCodeScan::new(person.id, client, Utc::now());
        self.records.record_scan(&scan).await?;

        tracing::info!(
            person_id = %person.id,
            ip_address = scan.ip_address.as_deref().unwrap_or("-"),
            "QR code scanned"
        );

        Ok(person)
    }

    /// Public lead form submission; the owner comes from the QR code
    pub async fn create_lead(&self, qr_code: &str, input: CreateLeadInput) -> CrmResult<LeadWithOwner> {
        let person = resolve_active_seller(self.persons.as_ref(), qr_code).await?;

        LeadUseCase::new(self.persons.clone(), self.records.clone())
            .create(person.id, input)
            .await
    }

    /// Most recent scans of one seller, newest first
    pub async fn scans_by_person(&self, person_id: PersonId) -> CrmResult<Vec<QrCodeScan>> {
        self.records
            .recent_scans(person_id, SCAN_HISTORY_LIMIT)
            .await
    }

    pub async fn stats(&self, person_id: Option<PersonId>) -> CrmResult<ScanStats> {
        let now = Utc::now();

        Ok(ScanStats {
            total: self.records.count_scans(person_id, None).await?,
            today: self
                .records
                .count_scans(person_id, Some(start_of_local_day(now)))
                .await?,
            this_week: self
                .records
                .count_scans(person_id, Some(now - Duration::days(7)))
                .await?,
            this_month: self
                .records
                .count_scans(person_id, Some(now - Duration::days(30)))
                .await?,
        })
    }
}

/// サーバーのローカルタイムゾーンでの当日 0 時
pub(crate) fn start_of_local_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.with_timezone(&Local)
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .map(|midnight| midnight.with_timezone(&Utc))
        // 0 時が存在しない（DST の切り替え）日は 24 時間前で代用
        .unwrap_or(now - Duration::hours(24))
}
