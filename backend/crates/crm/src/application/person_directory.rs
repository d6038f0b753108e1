//! Seller Directory Use Case
//!
//! Administrator-side management of seller accounts: creation with QR code
//! publication and verification email, listing with activity counters,
//! updates, soft/hard deletion and per-seller statistics.

use std::sync::Arc;

use auth::models::email::Email;
use auth::models::person_role::PersonRole;
use auth::{ContactDetails, Person, PersonFilter, PersonRepository};
use chrono::Utc;
use kernel::id::PersonId;
use kernel::validation;
use platform::mail::{EmailMessage, Mailer};
use platform::storage::ObjectStorage;

use crate::application::config::CrmConfig;
use crate::domain::entity::lead::Lead;
use crate::domain::entity::scan::QrCodeScan;
use crate::domain::repository::{LeadFilter, LeadRepository, ScanRepository};
use crate::domain::value_object::stats::LeadCounts;
use crate::error::{CrmError, CrmResult};

const SELLER: &str = "Vendedor";

/// Number of scans embedded in the seller detail view
pub const DETAIL_SCAN_LIMIT: i64 = 50;

#[derive(Debug, Clone, Default)]
pub struct CreatePersonInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pix_key: Option<String>,
    pub photo_url: Option<String>,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdatePersonInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pix_key: Option<String>,
    pub photo_url: Option<String>,
    pub active: Option<bool>,
}

/// Lead and scan totals for one seller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    pub leads: i64,
    pub scans: i64,
}

#[derive(Debug, Clone)]
pub struct PersonWithCounts {
    pub person: Person,
    pub counts: ActivityCounts,
}

/// Seller with all leads (newest first) and the most recent scans
#[derive(Debug, Clone)]
pub struct PersonDetail {
    pub person: Person,
    pub leads: Vec<Lead>,
    pub scans: Vec<QrCodeScan>,
    pub counts: ActivityCounts,
}

#[derive(Debug, Clone)]
pub struct PersonStats {
    pub person: Person,
    /// Recorded scan rows
    pub scan_count: i64,
    pub leads: LeadCounts,
}

/// Seller directory use case
pub struct PersonDirectoryUseCase<P, C, M, S>
where
    P: PersonRepository,
    C: LeadRepository + ScanRepository,
    M: Mailer,
    S: ObjectStorage,
{
    persons: Arc<P>,
    records: Arc<C>,
    mailer: Arc<M>,
    storage: Arc<S>,
    config: Arc<CrmConfig>,
}

impl<P, C, M, S> PersonDirectoryUseCase<P, C, M, S>
where
    P: PersonRepository,
    C: LeadRepository + ScanRepository,
    M: Mailer,
    S: ObjectStorage,
{
    pub fn new(
        persons: Arc<P>,
        records: Arc<C>,
        mailer: Arc<M>,
        storage: Arc<S>,
        config: Arc<CrmConfig>,
    ) -> Self {
        Self {
            persons,
            records,
            mailer,
            storage,
            config,
        }
    }

    /// Create a seller
    ///
    /// The verification email and the QR image are best-effort: failures are
    /// logged and the seller is returned without them.
    pub async fn create(&self, input: CreatePersonInput) -> CrmResult<Person> {
        validation::required(input.name.as_deref(), "Nome")?;
        let email = match non_blank(input.email) {
            Some(raw) => Some(Email::new(raw)?),
            None => None,
        };
        if let Some(email) = &email
            && self.persons.exists_by_email(email, None).await?
        {
            return Err(CrmError::EmailTaken);
        }

        let contact = ContactDetails {
            phone: non_blank(input.phone),
            pix_key: non_blank(input.pix_key),
            photo_url: non_blank(input.photo_url),
        };
        let name = input.name.unwrap_or_default().trim().to_string();
        let mut person = Person::new_seller(name, email, contact, Utc::now());
        self.persons.create(&person).await?;

        tracing::info!(person_id = %person.id, qr_code = %person.qr_code, "Seller created");

        self.send_verification_email(&person).await;

        match self.publish_qr_code(&person).await {
            Ok(url) => {
                person.qr_code_url = Some(url);
                person.updated_at = Utc::now();
                self.persons.update(&person).await?;
            }
            Err(e) => {
                tracing::error!(person_id = %person.id, error = %e, "QR code image generation failed");
            }
        }

        Ok(person)
    }

    async fn send_verification_email(&self, person: &Person) {
        let (Some(email), Some(token)) = (person.email_str(), person.verification.as_ref()) else {
            return;
        };

        let message = verification_email(&self.config, email, &person.name, token.as_str());
        if let Err(e) = self.mailer.send(message).await {
            tracing::error!(person_id = %person.id, error = %e, "Verification email failed");
        }
    }

    async fn publish_qr_code(&self, person: &Person) -> CrmResult<String> {
        let target = self.config.lead_form_url(person.qr_code.as_str());
        let svg = platform::qr::render_svg(&target)
            .map_err(|e| kernel::AppError::internal("QR code rendering failed").with_source(e))?;

        let key = format!("qrcodes/{}-{}.svg", person.id, person.qr_code);
        Ok(self
            .storage
            .put(&key, svg.into_bytes(), "image/svg+xml")
            .await?)
    }

    /// Sellers newest first, each with lead and scan totals
    pub async fn list(&self, active_only: bool) -> CrmResult<Vec<PersonWithCounts>> {
        let filter = PersonFilter {
            roles: Some(vec![PersonRole::Seller]),
            active_only,
        };
        let persons = self.persons.list(&filter).await?;
        let lead_totals = self.records.lead_totals_by_owner().await?;
        let scan_totals = self.records.scan_totals_by_person().await?;

        Ok(persons
            .into_iter()
            .map(|person| {
                let counts = ActivityCounts {
                    leads: lead_totals.get(&person.id).copied().unwrap_or(0),
                    scans: scan_totals.get(&person.id).copied().unwrap_or(0),
                };
                PersonWithCounts { person, counts }
            })
            .collect())
    }

    pub async fn get(&self, id: PersonId) -> CrmResult<PersonDetail> {
        let person = find_seller(self.persons.as_ref(), id).await?;

        let leads = self
            .records
            .list_leads(&LeadFilter::owned_by(id))
            .await?
            .into_iter()
            .map(|row| row.lead)
            .collect::<Vec<_>>();
        let scans = self.records.recent_scans(id, DETAIL_SCAN_LIMIT).await?;
        let counts = ActivityCounts {
            leads: leads.len() as i64,
            scans: self.records.count_scans(Some(id), None).await?,
        };

        Ok(PersonDetail {
            person,
            leads,
            scans,
            counts,
        })
    }

    /// Public lookup used by the QR landing page
    pub async fn get_by_qr_code(&self, qr_code: &str) -> CrmResult<Person> {
        resolve_active_seller(self.persons.as_ref(), qr_code).await
    }

    pub async fn update(&self, id: PersonId, input: UpdatePersonInput) -> CrmResult<Person> {
        let mut person = find_seller(self.persons.as_ref(), id).await?;

        if let Some(name) = input.name {
            validation::required(Some(name.as_str()), "Nome")?;
            person.name = name.trim().to_string();
        }
        if let Some(email) = input.email {
            let email = Email::new(email)?;
            if self.persons.exists_by_email(&email, Some(id)).await? {
                return Err(CrmError::EmailTaken);
            }
            person.email = Some(email);
        }
        if let Some(phone) = input.phone {
            person.phone = Some(phone);
        }
        if let Some(pix_key) = input.pix_key {
            person.pix_key = Some(pix_key);
        }
        if let Some(photo_url) = input.photo_url {
            person.photo_url = Some(photo_url);
        }
        if let Some(active) = input.active {
            person.active = active;
        }

        person.updated_at = Utc::now();
        self.persons.update(&person).await?;

        tracing::info!(person_id = %person.id, "Seller updated");

        Ok(person)
    }

    /// Soft delete: the seller is deactivated and keeps its history
    pub async fn deactivate(&self, id: PersonId) -> CrmResult<Person> {
        let mut person = find_seller(self.persons.as_ref(), id).await?;
        person.deactivate(Utc::now());
        self.persons.update(&person).await?;

        tracing::info!(person_id = %person.id, "Seller deactivated");

        Ok(person)
    }

    /// Physically remove the seller; leads and scans go with it
    pub async fn hard_delete(&self, id: PersonId) -> CrmResult<Person> {
        let person = find_seller(self.persons.as_ref(), id).await?;
        if !self.persons.delete(id).await? {
            return Err(CrmError::NotFound(SELLER));
        }

        tracing::info!(person_id = %person.id, "Seller deleted");

        Ok(person)
    }

    pub async fn stats(&self, id: PersonId) -> CrmResult<PersonStats> {
        let person = find_seller(self.persons.as_ref(), id).await?;
        let leads = self.records.lead_counts(Some(id)).await?;
        let scan_count = self.records.count_scans(Some(id), None).await?;

        Ok(PersonStats {
            person,
            scan_count,
            leads,
        })
    }
}

/// 販売者のみを対象に ID で検索する
pub(crate) async fn find_seller<P: PersonRepository>(persons: &P, id: PersonId) -> CrmResult<Person> {
    persons
        .find_by_id(id)
        .await?
        .filter(|p| p.role == PersonRole::Seller)
        .ok_or(CrmError::NotFound(SELLER))
}

/// QR コードから有効な販売者を解決する
pub(crate) async fn resolve_active_seller<P: PersonRepository>(
    persons: &P,
    qr_code: &str,
) -> CrmResult<Person> {
    let person = persons
        .find_by_qr_code(qr_code.trim())
        .await?
        .filter(|p| p.role == PersonRole::Seller)
        .ok_or(CrmError::InvalidQrCode)?;

    if !person.active {
        return Err(CrmError::SellerDisabled);
    }

    Ok(person)
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn verification_email(config: &CrmConfig, to: &str, name: &str, token: &str) -> EmailMessage {
    let url = config.verification_url(token);

    let text = format!(
        "Olá, {name}!\n\n\
         Você foi cadastrado como vendedor na plataforma.\n\
         Para acessar sua conta, verifique seu email e crie uma senha através do link:\n\
         {url}\n\n\
         Este link expira em 24 horas.\n\
         Se você não solicitou este cadastro, ignore este email.\n"
    );
    let html = format!(
        "<p>Olá, <strong>{name}</strong>!</p>\
         <p>Você foi cadastrado como vendedor na plataforma.</p>\
         <p>Para acessar sua conta e visualizar seus leads, verifique seu email e crie uma senha:</p>\
         <p><a href=\"{url}\">Verificar Email e Criar Senha</a></p>\
         <p><strong>Este link expira em 24 horas.</strong></p>\
         <p>Se você não solicitou este cadastro, ignore este email.</p>"
    );

    EmailMessage {
        from: config.mail_from.clone(),
        to: to.to_string(),
        subject: "Bem-vindo! Verifique seu Email".to_string(),
        html,
        text,
    }
}
