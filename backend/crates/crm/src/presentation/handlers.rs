//! HTTP Handlers

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::middleware::CurrentPerson;
use auth::{PersonRepository, PgPersonRepository};
use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::{ConnectInfo, FromRequestParts, Path, Query, State};
use axum::http::{StatusCode, request::Parts};
use axum_extra::extract::WithRejection;
use kernel::error::app_error::AppError;
use kernel::id::{LeadId, PersonId};
use kernel::response::ApiResponse;
use kernel::validation;
use platform::client::{ClientInfo, extract_client_info};
use platform::mail::{LogMailer, Mailer};
use platform::storage::{FsObjectStorage, ObjectStorage};

use crate::application::leads::{DEFAULT_NEW_LEADS_DAYS, parse_status};
use crate::application::{
    CrmConfig, LeadUseCase, PersonDirectoryUseCase, QrScanUseCase, UploadFolder, UploadUseCase,
    UploadedFile,
};
use crate::domain::repository::{LeadFilter, LeadRepository, ScanRepository};
use crate::domain::value_object::stats::ScanStats;
use crate::error::{CrmError, CrmResult};
use crate::infra::postgres::PgCrmRepository;
use crate::presentation::dto::{
    CreateLeadRequest, CreatePersonRequest, LeadListQuery, LeadResponse, LeadStatsResponse,
    LeadSummary, NewLeadsQuery, OwnerLeadResponse, PersonDetailResponse, PersonListQuery,
    PersonResponse, PersonStatsResponse, PublicPersonResponse, ScanAccepted, ScanResponse,
    ScanStatsQuery, SellerLeadsQuery, UpdateLeadRequest, UpdatePersonRequest,
    UpdateStatusRequest, UploadResponse,
};

/// Concrete collaborators wired into the CRM routers
pub trait CrmAdapters: Send + Sync + 'static {
    type Persons: PersonRepository + Send + Sync + 'static;
    type Records: LeadRepository + ScanRepository + Send + Sync + 'static;
    type Mailer: Mailer + Send + Sync + 'static;
    type Storage: ObjectStorage + Send + Sync + 'static;
}

/// Production wiring: PostgreSQL, log transport, local filesystem
pub struct PgAdapters;

impl CrmAdapters for PgAdapters {
    type Persons = PgPersonRepository;
    type Records = PgCrmRepository;
    type Mailer = LogMailer;
    type Storage = FsObjectStorage;
}

/// Shared state for CRM handlers
pub struct CrmAppState<A: CrmAdapters> {
    pub persons: Arc<A::Persons>,
    pub records: Arc<A::Records>,
    pub mailer: Arc<A::Mailer>,
    pub storage: Arc<A::Storage>,
    pub config: Arc<CrmConfig>,
}

// derive would require `A: Clone`
impl<A: CrmAdapters> Clone for CrmAppState<A> {
    fn clone(&self) -> Self {
        Self {
            persons: self.persons.clone(),
            records: self.records.clone(),
            mailer: self.mailer.clone(),
            storage: self.storage.clone(),
            config: self.config.clone(),
        }
    }
}

impl<A: CrmAdapters> CrmAppState<A> {
    pub fn new(
        persons: A::Persons,
        records: A::Records,
        mailer: A::Mailer,
        storage: A::Storage,
        config: Arc<CrmConfig>,
    ) -> Self {
        Self {
            persons: Arc::new(persons),
            records: Arc::new(records),
            mailer: Arc::new(mailer),
            storage: Arc::new(storage),
            config,
        }
    }

    fn directory(&self) -> PersonDirectoryUseCase<A::Persons, A::Records, A::Mailer, A::Storage> {
        PersonDirectoryUseCase::new(
            self.persons.clone(),
            self.records.clone(),
            self.mailer.clone(),
            self.storage.clone(),
            self.config.clone(),
        )
    }

    fn leads(&self) -> LeadUseCase<A::Persons, A::Records> {
        LeadUseCase::new(self.persons.clone(), self.records.clone())
    }

    fn scans(&self) -> QrScanUseCase<A::Persons, A::Records> {
        QrScanUseCase::new(self.persons.clone(), self.records.clone())
    }

    fn uploads(&self) -> UploadUseCase<A::Storage> {
        UploadUseCase::new(self.storage.clone())
    }
}

type JsonBody<T> = WithRejection<Json<T>, AppError>;
type QueryParams<T> = WithRejection<Query<T>, AppError>;

/// Requester IP and User-Agent
///
/// The socket address is only present when the server runs with
/// `into_make_service_with_connect_info`.
pub struct ClientMeta(pub ClientInfo);

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(Self(extract_client_info(&parts.headers, direct_ip)))
    }
}

fn person_id(raw: &str) -> CrmResult<PersonId> {
    PersonId::parse(raw).ok_or(CrmError::NotFound("Vendedor"))
}

fn lead_id(raw: &str) -> CrmResult<LeadId> {
    LeadId::parse(raw).ok_or(CrmError::NotFound("Lead"))
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Persons (/api/person)
// ============================================================================

/// POST /api/person
pub async fn create_person<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    WithRejection(Json(req), _): JsonBody<CreatePersonRequest>,
) -> CrmResult<ApiResponse<PersonResponse>> {
    let person = state.directory().create(req.into()).await?;

    Ok(ApiResponse::created(PersonResponse::from(&person)))
}

/// GET /api/person
pub async fn list_persons<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    WithRejection(Query(query), _): QueryParams<PersonListQuery>,
) -> CrmResult<ApiResponse<Vec<PersonResponse>>> {
    let persons = state.directory().list(query.active_only()).await?;

    Ok(ApiResponse::ok(persons.iter().map(PersonResponse::from).collect()))
}

/// GET /api/person/{id}
pub async fn get_person<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(id): Path<String>,
) -> CrmResult<ApiResponse<PersonDetailResponse>> {
    let detail = state.directory().get(person_id(&id)?).await?;

    Ok(ApiResponse::ok(PersonDetailResponse::from(&detail)))
}

/// GET /api/person/qr/{qrCode}
pub async fn get_person_by_qr_code<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(qr_code): Path<String>,
) -> CrmResult<ApiResponse<PublicPersonResponse>> {
    let person = state.directory().get_by_qr_code(&qr_code).await?;

    Ok(ApiResponse::ok(PublicPersonResponse::from(&person)))
}

/// PUT /api/person/{id}
pub async fn update_person<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdatePersonRequest>,
) -> CrmResult<ApiResponse<PersonResponse>> {
    let person = state.directory().update(person_id(&id)?, req.into()).await?;

    Ok(ApiResponse::ok(PersonResponse::from(&person)))
}

/// DELETE /api/person/{id}
pub async fn deactivate_person<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(id): Path<String>,
) -> CrmResult<ApiResponse<PersonResponse>> {
    let person = state.directory().deactivate(person_id(&id)?).await?;

    Ok(ApiResponse::ok(PersonResponse::from(&person)))
}

/// DELETE /api/person/{id}/hard
pub async fn hard_delete_person<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(id): Path<String>,
) -> CrmResult<ApiResponse<PersonResponse>> {
    let person = state.directory().hard_delete(person_id(&id)?).await?;

    Ok(ApiResponse::ok(PersonResponse::from(&person)))
}

/// GET /api/person/{id}/stats
pub async fn person_stats<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(id): Path<String>,
) -> CrmResult<ApiResponse<PersonStatsResponse>> {
    let stats = state.directory().stats(person_id(&id)?).await?;

    Ok(ApiResponse::ok(PersonStatsResponse::from(&stats)))
}

// ============================================================================
// Leads (/api/lead)
// ============================================================================

/// POST /api/lead
pub async fn create_lead<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    WithRejection(Json(req), _): JsonBody<CreateLeadRequest>,
) -> CrmResult<ApiResponse<LeadResponse>> {
    validation::required(req.owner_id.as_deref(), "Vendedor")?;
    let owner_id = person_id(req.owner_id.as_deref().unwrap_or_default())?;
    let lead = state.leads().create(owner_id, req.into()).await?;

    Ok(ApiResponse::created(LeadResponse::detailed(&lead)))
}

/// GET /api/lead?status=&ownerId=
pub async fn list_leads<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    WithRejection(Query(query), _): QueryParams<LeadListQuery>,
) -> CrmResult<ApiResponse<Vec<LeadResponse>>> {
    let status = present(query.status)
        .map(|s| parse_status(&s))
        .transpose()?;
    let owner_id = match present(query.owner_id) {
        Some(raw) => match PersonId::parse(&raw) {
            Some(id) => Some(id),
            // no lead can belong to a malformed id
            None => return Ok(ApiResponse::ok(Vec::new())),
        },
        None => None,
    };

    let filter = LeadFilter {
        status,
        owner_id,
        ..LeadFilter::default()
    };
    let leads = state.leads().list(&filter).await?;

    Ok(ApiResponse::ok(leads.iter().map(LeadResponse::listed).collect()))
}

/// GET /api/lead/owner/{ownerId}
pub async fn leads_by_owner<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(owner_id): Path<String>,
) -> CrmResult<ApiResponse<Vec<OwnerLeadResponse>>> {
    let Some(owner_id) = PersonId::parse(&owner_id) else {
        return Ok(ApiResponse::ok(Vec::new()));
    };
    let leads = state.leads().list_by_owner(owner_id).await?;

    Ok(ApiResponse::ok(leads.iter().map(OwnerLeadResponse::from).collect()))
}

/// GET /api/lead/{id}
pub async fn get_lead<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(id): Path<String>,
) -> CrmResult<ApiResponse<LeadResponse>> {
    let lead = state.leads().get(lead_id(&id)?).await?;

    Ok(ApiResponse::ok(LeadResponse::detailed(&lead)))
}

/// PUT /api/lead/{id}
pub async fn update_lead<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdateLeadRequest>,
) -> CrmResult<ApiResponse<LeadResponse>> {
    let lead = state.leads().update(lead_id(&id)?, req.into()).await?;

    Ok(ApiResponse::ok(LeadResponse::listed(&lead)))
}

/// PATCH /api/lead/{id}/status
pub async fn update_lead_status<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdateStatusRequest>,
) -> CrmResult<ApiResponse<LeadResponse>> {
    let lead = state.leads().update_status(lead_id(&id)?, req.status).await?;

    Ok(ApiResponse::ok(LeadResponse::from(&lead)))
}

/// DELETE /api/lead/{id}
pub async fn delete_lead<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(id): Path<String>,
) -> CrmResult<ApiResponse<LeadResponse>> {
    let lead = state.leads().delete(lead_id(&id)?).await?;

    Ok(ApiResponse::ok(LeadResponse::from(&lead.lead)))
}

/// GET /api/lead/stats
pub async fn lead_stats<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
) -> CrmResult<ApiResponse<LeadStatsResponse>> {
    let counts = state.leads().stats().await?;

    Ok(ApiResponse::ok(counts.into()))
}

/// GET /api/lead/new?days=7
pub async fn new_leads<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    WithRejection(Query(query), _): QueryParams<NewLeadsQuery>,
) -> CrmResult<ApiResponse<Vec<LeadResponse>>> {
    let days = query.days.unwrap_or(DEFAULT_NEW_LEADS_DAYS);
    if days < 0 {
        return Err(AppError::bad_request("Parâmetros inválidos: days deve ser positivo").into());
    }
    let leads = state.leads().new_leads(days).await?;

    Ok(ApiResponse::ok(leads.iter().map(LeadResponse::listed).collect()))
}

// ============================================================================
// Seller area (/api/seller)
// ============================================================================

/// GET /api/seller/my-leads?status=
pub async fn my_leads<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    seller: CurrentPerson,
    WithRejection(Query(query), _): QueryParams<SellerLeadsQuery>,
) -> CrmResult<ApiResponse<Vec<LeadSummary>>> {
    let status = present(query.status)
        .map(|s| parse_status(&s))
        .transpose()?;
    let leads = state.leads().seller_leads(seller.id, status).await?;

    Ok(ApiResponse::ok(leads.iter().map(LeadSummary::from).collect()))
}

/// GET /api/seller/my-leads/{id}
pub async fn my_lead<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    seller: CurrentPerson,
    Path(id): Path<String>,
) -> CrmResult<ApiResponse<LeadSummary>> {
    let lead = state.leads().seller_lead(seller.id, lead_id(&id)?).await?;

    Ok(ApiResponse::ok(LeadSummary::from(&lead)))
}

/// GET /api/seller/my-stats
pub async fn my_stats<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    seller: CurrentPerson,
) -> CrmResult<ApiResponse<LeadStatsResponse>> {
    let counts = state.leads().seller_stats(seller.id).await?;

    Ok(ApiResponse::ok(counts.into()))
}

// ============================================================================
// QR codes (/api/qrcode)
// ============================================================================

/// POST /api/qrcode/scan/{qrCode}
pub async fn scan_qr_code<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(qr_code): Path<String>,
    ClientMeta(client): ClientMeta,
) -> CrmResult<ApiResponse<ScanAccepted>> {
    let person = state.scans().register_scan(&qr_code, client).await?;

    Ok(ApiResponse::ok(ScanAccepted::from(&person)))
}

/// POST /api/qrcode/lead/{qrCode}
pub async fn create_lead_from_qr<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(qr_code): Path<String>,
    WithRejection(Json(req), _): JsonBody<CreateLeadRequest>,
) -> CrmResult<ApiResponse<LeadResponse>> {
    let lead = state.scans().create_lead(&qr_code, req.into()).await?;

    Ok(ApiResponse::created(LeadResponse::listed(&lead)).with_message("Cadastro realizado com sucesso!"))
}

/// GET /api/qrcode/scans/{personId}
pub async fn scans_by_person<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    Path(person): Path<String>,
) -> CrmResult<ApiResponse<Vec<ScanResponse>>> {
    let Some(person) = PersonId::parse(&person) else {
        return Ok(ApiResponse::ok(Vec::new()));
    };
    let scans = state.scans().scans_by_person(person).await?;

    Ok(ApiResponse::ok(scans.iter().map(ScanResponse::from).collect()))
}

/// GET /api/qrcode/stats?personId=
pub async fn scan_stats<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    WithRejection(Query(query), _): QueryParams<ScanStatsQuery>,
) -> CrmResult<ApiResponse<ScanStats>> {
    let person = match present(query.person_id) {
        Some(raw) => match PersonId::parse(&raw) {
            Some(id) => Some(id),
            None => return Ok(ApiResponse::ok(ScanStats::default())),
        },
        None => None,
    };
    let stats = state.scans().stats(person).await?;

    Ok(ApiResponse::ok(stats))
}

// ============================================================================
// Uploads (/api/upload)
// ============================================================================

/// First multipart field named `file`
async fn read_file(
    multipart: Result<Multipart, MultipartRejection>,
) -> CrmResult<Option<UploadedFile>> {
    // non-multipart bodies carry no file
    let Ok(mut multipart) = multipart else {
        return Ok(None);
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError) -> CrmError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return CrmError::FileTooLarge;
    }
    AppError::bad_request("Requisição multipart inválida")
        .with_source(err)
        .into()
}

async fn upload_to<A: CrmAdapters>(
    state: &CrmAppState<A>,
    folder: UploadFolder,
    multipart: Result<Multipart, MultipartRejection>,
) -> CrmResult<ApiResponse<UploadResponse>> {
    let file = read_file(multipart).await?;
    let url = state.uploads().upload(folder, file).await?;

    Ok(ApiResponse::ok(UploadResponse { url }))
}

/// POST /api/upload/profile
pub async fn upload_profile_photo<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CrmResult<ApiResponse<UploadResponse>> {
    upload_to(&state, UploadFolder::Profiles, multipart).await
}

/// POST /api/upload/energy-bill
pub async fn upload_energy_bill<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CrmResult<ApiResponse<UploadResponse>> {
    upload_to(&state, UploadFolder::EnergyBills, multipart).await
}

/// POST /api/upload/roof-photo
pub async fn upload_roof_photo<A: CrmAdapters>(
    State(state): State<CrmAppState<A>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CrmResult<ApiResponse<UploadResponse>> {
    upload_to(&state, UploadFolder::RoofPhotos, multipart).await
}
