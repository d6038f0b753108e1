//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{LeadId, PersonId, QrCodeScanId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::lead::{Lead, LeadWithOwner, OwnerSummary};
use crate::domain::entity::scan::QrCodeScan;
use crate::domain::repository::{LeadFilter, LeadRepository, ScanRepository};
use crate::domain::value_object::{lead_status::LeadStatus, stats::LeadCounts};
use crate::error::{CrmError, CrmResult};

const LEAD_WITH_OWNER_SELECT: &str = r#"
    SELECT
        l.id,
        l.name,
        l.email,
        l.phone,
        l.energy_bill,
        l.roof_photo,
        l.notes,
        l.status,
        l.owner_id,
        l.created_at,
        l.updated_at,
        p.name AS owner_name,
        p.email AS owner_email,
        p.phone AS owner_phone
    FROM leads l
    JOIN persons p ON p.id = l.owner_id
"#;

/// PostgreSQL-backed lead and scan repository
#[derive(Clone)]
pub struct PgCrmRepository {
    pool: PgPool,
}

impl PgCrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LeadRepository for PgCrmRepository {
    async fn create_lead(&self, lead: &Lead) -> CrmResult<()> {
        sqlx::query(
            r#"
            INSERT INTO leads (
                id,
                name,
                email,
                phone,
                energy_bill,
                roof_photo,
                notes,
                status,
                owner_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(lead.id.as_uuid())
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.energy_bill)
        .bind(&lead.roof_photo)
        .bind(&lead.notes)
        .bind(lead.status.code())
        .bind(lead.owner_id.as_uuid())
        .bind(lead.created_at)
        .bind(lead.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_lead(&self, id: LeadId) -> CrmResult<Option<LeadWithOwner>> {
        let sql = format!("{LEAD_WITH_OWNER_SELECT} WHERE l.id = $1");
        let row = sqlx::query_as::<_, LeadRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(LeadRow::into_lead_with_owner))
    }

    async fn list_leads(&self, filter: &LeadFilter) -> CrmResult<Vec<LeadWithOwner>> {
        let sql = format!(
            "{LEAD_WITH_OWNER_SELECT} \
             WHERE ($1::text IS NULL OR l.status = $1) \
               AND ($2::uuid IS NULL OR l.owner_id = $2) \
               AND ($3::timestamptz IS NULL OR l.created_at >= $3) \
             ORDER BY l.created_at DESC"
        );
        let rows = sqlx::query_as::<_, LeadRow>(&sql)
            .bind(filter.status.map(|s| s.code()))
            .bind(filter.owner_id.map(PersonId::into_uuid))
            .bind(filter.created_since)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(LeadRow::into_lead_with_owner).collect())
    }

    async fn update_lead(&self, lead: &Lead) -> CrmResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE leads SET
                name = $2,
                email = $3,
                phone = $4,
                energy_bill = $5,
                roof_photo = $6,
                notes = $7,
                status = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(lead.id.as_uuid())
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.energy_bill)
        .bind(&lead.roof_photo)
        .bind(&lead.notes)
        .bind(lead.status.code())
        .bind(lead.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_lead(&self, id: LeadId) -> CrmResult<bool> {
        let deleted = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn lead_counts(&self, owner_id: Option<PersonId>) -> CrmResult<LeadCounts> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status, COUNT(*)
            FROM leads
            WHERE ($1::uuid IS NULL OR owner_id = $1)
            GROUP BY status
            "#,
        )
        .bind(owner_id.map(PersonId::into_uuid))
        .fetch_all(&self.pool)
        .await?;

        let mut counts = LeadCounts::default();
        for (status, n) in rows {
            counts.add(parse_stored_status(&status), n);
        }
        Ok(counts)
    }

    async fn lead_totals_by_owner(&self) -> CrmResult<HashMap<PersonId, i64>> {
        let rows = sqlx::query_as::<_, (Uuid, i64)>(
            "SELECT owner_id, COUNT(*) FROM leads GROUP BY owner_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, n)| (PersonId::from_uuid(id), n))
            .collect())
    }
}

impl ScanRepository for PgCrmRepository {
    async fn record_scan(&self, scan: &QrCodeScan) -> CrmResult<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE persons SET scan_count = scan_count + 1 WHERE id = $1")
            .bind(scan.person_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if updated == 0 {
            // tx は drop 時にロールバックされる
            return Err(CrmError::NotFound("Vendedor"));
        }

        sqlx::query(
            r#"
            INSERT INTO qr_code_scans (id, person_id, ip_address, user_agent, scanned_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(scan.id.as_uuid())
        .bind(scan.person_id.as_uuid())
        .bind(&scan.ip_address)
        .bind(&scan.user_agent)
        .bind(scan.scanned_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn recent_scans(&self, person_id: PersonId, limit: i64) -> CrmResult<Vec<QrCodeScan>> {
        let rows = sqlx::query_as::<_, ScanRow>(
            r#"
            SELECT id, person_id, ip_address, user_agent, scanned_at
            FROM qr_code_scans
            WHERE person_id = $1
            ORDER BY scanned_at DESC
            LIMIT $2
            "#,
        )
        .bind(person_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ScanRow::into_scan).collect())
    }

    async fn count_scans(
        &self,
        person_id: Option<PersonId>,
        since: Option<DateTime<Utc>>,
    ) -> CrmResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM qr_code_scans
            WHERE ($1::uuid IS NULL OR person_id = $1)
              AND ($2::timestamptz IS NULL OR scanned_at >= $2)
            "#,
        )
        .bind(person_id.map(PersonId::into_uuid))
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn scan_totals_by_person(&self) -> CrmResult<HashMap<PersonId, i64>> {
        let rows = sqlx::query_as::<_, (Uuid, i64)>(
            "SELECT person_id, COUNT(*) FROM qr_code_scans GROUP BY person_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, n)| (PersonId::from_uuid(id), n))
            .collect())
    }
}

fn parse_stored_status(code: &str) -> LeadStatus {
    LeadStatus::from_code(code).unwrap_or_else(|| {
        tracing::warn!(status = code, "Unknown lead status, treating as NEGOTIATION");
        LeadStatus::Negotiation
    })
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct LeadRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    energy_bill: Option<String>,
    roof_photo: Option<String>,
    notes: Option<String>,
    status: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_name: String,
    owner_email: Option<String>,
    owner_phone: Option<String>,
}

impl LeadRow {
    fn into_lead_with_owner(self) -> LeadWithOwner {
        let owner_id = PersonId::from_uuid(self.owner_id);
        LeadWithOwner {
            lead: Lead {
                id: LeadId::from_uuid(self.id),
                name: self.name,
                email: self.email,
                phone: self.phone,
                energy_bill: self.energy_bill,
                roof_photo: self.roof_photo,
                notes: self.notes,
                status: parse_stored_status(&self.status),
                owner_id,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            owner: OwnerSummary {
                id: owner_id,
                name: self.owner_name,
                email: self.owner_email,
                phone: self.owner_phone,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct ScanRow {
    id: Uuid,
    person_id: Uuid,
    ip_address: Option<String>,
    user_agent: Option<String>,
    scanned_at: DateTime<Utc>,
}

impl ScanRow {
    fn into_scan(self) -> QrCodeScan {
        QrCodeScan {
            id: QrCodeScanId::from_uuid(self.id),
            person_id: PersonId::from_uuid(self.person_id),
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            scanned_at: self.scanned_at,
        }
    }
}
