//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::PersonId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::person::Person;
use crate::domain::repository::{PersonFilter, PersonRepository};
use crate::domain::value_object::{
    email::Email, person_password::PersonPassword, person_role::PersonRole, qr_code::QrCode,
    verification_token::VerificationToken,
};
use crate::error::{AuthError, AuthResult};

const PERSON_COLUMNS: &str = r#"
    id,
    name,
    email,
    phone,
    pix_key,
    photo_url,
    password_hash,
    role,
    active,
    qr_code,
    qr_code_url,
    scan_count,
    email_verified,
    verification_token,
    token_expiry,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed person repository
#[derive(Clone)]
pub struct PgPersonRepository {
    pool: PgPool,
}

impl PgPersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn select_where(condition: &str) -> String {
    format!("SELECT {PERSON_COLUMNS} FROM persons WHERE {condition}")
}

impl PersonRepository for PgPersonRepository {
    async fn create(&self, person: &Person) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO persons (
                id,
                name,
                email,
                phone,
                pix_key,
                photo_url,
                password_hash,
                role,
                active,
                qr_code,
                qr_code_url,
                scan_count,
                email_verified,
                verification_token,
                token_expiry,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(person.id.as_uuid())
        .bind(&person.name)
        .bind(person.email_str())
        .bind(&person.phone)
        .bind(&person.pix_key)
        .bind(&person.photo_url)
        .bind(person.password_hash.as_ref().map(PersonPassword::as_phc_string))
        .bind(person.role.code())
        .bind(person.active)
        .bind(person.qr_code.as_str())
        .bind(&person.qr_code_url)
        .bind(person.scan_count)
        .bind(person.email_verified)
        .bind(person.verification.as_ref().map(VerificationToken::as_str))
        .bind(person.verification.as_ref().map(VerificationToken::expires_at))
        .bind(person.created_at)
        .bind(person.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: PersonId) -> AuthResult<Option<Person>> {
        let row = sqlx::query_as::<_, PersonRow>(&select_where("id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(PersonRow::into_person).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Person>> {
        let row = sqlx::query_as::<_, PersonRow>(&select_where("email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(PersonRow::into_person).transpose()
    }

    async fn find_by_qr_code(&self, qr_code: &str) -> AuthResult<Option<Person>> {
        let row = sqlx::query_as::<_, PersonRow>(&select_where("qr_code = $1"))
            .bind(qr_code)
            .fetch_optional(&self.pool)
            .await?;

        row.map(PersonRow::into_person).transpose()
    }

    async fn find_by_valid_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<Person>> {
        let sql = select_where("verification_token = $1 AND token_expiry >= $2");
        let row = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(token)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        row.map(PersonRow::into_person).transpose()
    }

    async fn exists_by_email(&self, email: &Email, except: Option<PersonId>) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM persons WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(email.as_str())
        .bind(except.map(PersonId::into_uuid))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self, filter: &PersonFilter) -> AuthResult<Vec<Person>> {
        let roles: Option<Vec<String>> = filter
            .roles
            .as_ref()
            .map(|roles| roles.iter().map(|r| r.code().to_string()).collect());

        let sql = select_where(
            "($1::text[] IS NULL OR role = ANY($1)) AND (NOT $2 OR active) ORDER BY created_at DESC",
        );
        let rows = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(roles)
            .bind(filter.active_only)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(PersonRow::into_person).collect()
    }

    async fn update(&self, person: &Person) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE persons SET
                name = $2,
                email = $3,
                phone = $4,
                pix_key = $5,
                photo_url = $6,
                password_hash = $7,
                role = $8,
                active = $9,
                qr_code_url = $10,
                email_verified = $11,
                verification_token = $12,
                token_expiry = $13,
                updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(person.id.as_uuid())
        .bind(&person.name)
        .bind(person.email_str())
        .bind(&person.phone)
        .bind(&person.pix_key)
        .bind(&person.photo_url)
        .bind(person.password_hash.as_ref().map(PersonPassword::as_phc_string))
        .bind(person.role.code())
        .bind(person.active)
        .bind(&person.qr_code_url)
        .bind(person.email_verified)
        .bind(person.verification.as_ref().map(VerificationToken::as_str))
        .bind(person.verification.as_ref().map(VerificationToken::expires_at))
        .bind(person.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::NotFound("Registro"));
        }

        Ok(())
    }

    async fn delete(&self, id: PersonId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
pub(crate) struct PersonRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    pix_key: Option<String>,
    photo_url: Option<String>,
    password_hash: Option<String>,
    role: Option<String>,
    active: bool,
    qr_code: String,
    qr_code_url: Option<String>,
    scan_count: i32,
    email_verified: bool,
    verification_token: Option<String>,
    token_expiry: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PersonRow {
    pub(crate) fn into_person(self) -> AuthResult<Person> {
        // 旧データのロール欠落・不明値は SELLER として扱う
        let role = match self.role.as_deref().map(PersonRole::from_code) {
            Some(Some(role)) => role,
            other => {
                tracing::warn!(person_id = %self.id, role = ?other, "Unknown role, falling back to SELLER");
                PersonRole::Seller
            }
        };

        let password_hash = self
            .password_hash
            .map(PersonPassword::from_phc_string)
            .transpose()?;

        let verification = match (self.verification_token, self.token_expiry) {
            (Some(token), Some(expiry)) => Some(VerificationToken::from_db(token, expiry)),
            _ => None,
        };

        Ok(Person {
            id: PersonId::from_uuid(self.id),
            name: self.name,
            email: self.email.map(Email::from_db),
            phone: self.phone,
            pix_key: self.pix_key,
            photo_url: self.photo_url,
            password_hash,
            role,
            active: self.active,
            qr_code: QrCode::from_db(self.qr_code),
            qr_code_url: self.qr_code_url,
            scan_count: self.scan_count,
            email_verified: self.email_verified,
            verification,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
