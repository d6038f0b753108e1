//! File Upload Use Case

use std::sync::Arc;

use platform::storage::ObjectStorage;
use uuid::Uuid;

use crate::error::{CrmError, CrmResult, MAX_UPLOAD_BYTES};

/// Upload destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFolder {
    /// Seller photos (authenticated)
    Profiles,
    /// Energy bills from the public lead form
    EnergyBills,
    /// Roof photos from the public lead form
    RoofPhotos,
}

impl UploadFolder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            UploadFolder::Profiles => "profiles",
            UploadFolder::EnergyBills => "energy-bills",
            UploadFolder::RoofPhotos => "roof-photos",
        }
    }
}

/// A file received from a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 許可された MIME タイプと保存時の拡張子
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}

pub struct UploadUseCase<S>
where
    S: ObjectStorage,
{
    storage: Arc<S>,
}

impl<S> UploadUseCase<S>
where
    S: ObjectStorage,
{
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Validate and store the file; returns its public URL
    pub async fn upload(&self, folder: UploadFolder, file: Option<UploadedFile>) -> CrmResult<String> {
        let file = file.ok_or(CrmError::MissingFile)?;
        if file.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(CrmError::FileTooLarge);
        }
        let content_type = file.content_type.trim().to_ascii_lowercase();
        let extension = extension_for(&content_type).ok_or(CrmError::UnsupportedFileType)?;

        let key = format!("{}/{}.{}", folder.as_str(), Uuid::new_v4(), extension);
        let size = file.bytes.len();
        let url = self.storage.put(&key, file.bytes, &content_type).await?;

        tracing::info!(
            key = %key,
            size,
            original_name = file.file_name.as_deref().unwrap_or("-"),
            "File uploaded"
        );

        Ok(url)
    }
}
