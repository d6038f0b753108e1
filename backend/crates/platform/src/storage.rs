//! Object storage seam
//!
//! Files are addressed by a key such as `qrcodes/<id>-<code>.svg` and
//! published under a public URL. [`FsObjectStorage`] writes below a local
//! directory that the HTTP layer serves at `/uploads`.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[trait_variant::make(ObjectStorage: Send)]
pub trait LocalObjectStorage {
    /// Store `bytes` under `key` and return the public URL
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// Filesystem-backed storage
#[derive(Debug, Clone)]
pub struct FsObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl FsObjectStorage {
    /// `public_base_url` は `/uploads` や `https://cdn.example.com/uploads` など
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let is_safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_safe {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

impl ObjectStorage for FsObjectStorage {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!(key, content_type, size = bytes.len(), "Object stored");
        Ok(self.public_url(key))
    }
}

#[cfg(test)]
mod tests {
    use super::{FsObjectStorage, ObjectStorage, StorageError};

    #[tokio::test]
    async fn test_put_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsObjectStorage::new(dir.path(), "/uploads/");

        let url = storage
            .put("qrcodes/abc-QR-1.svg", b"<svg/>".to_vec(), "image/svg+xml")
            .await
            .unwrap();

        assert_eq!(url, "/uploads/qrcodes/abc-QR-1.svg");
        let written = std::fs::read(dir.path().join("qrcodes/abc-QR-1.svg")).unwrap();
        assert_eq!(written, b"<svg/>");
    }

    #[tokio::test]
    async fn test_put_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsObjectStorage::new(dir.path(), "/uploads");

        for key in ["../escape.txt", "/etc/passwd", ""] {
            let result = storage.put(key, vec![1], "text/plain").await;
            assert!(matches!(result, Err(StorageError::InvalidKey(_))), "{key}");
        }
    }
}
