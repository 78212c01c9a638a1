//! Deliverable file storage

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::{
    constants::BLOB_HASH_PREFIX_LEN,
    error::{AppError, AppResult},
    models::DeliverableType,
};

/// Opaque blob store for uploaded deliverables
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any previous content, and return
    /// the stored location
    async fn put(&self, key: &str, bytes: &[u8]) -> AppResult<String>;

    /// Remove a previously stored blob; a missing blob is not an error
    async fn delete(&self, location: &str) -> AppResult<()>;
}

/// Key for an uploaded deliverable: `{numero}/{type}-{hash prefix}.pdf`
///
/// Content-addressed, so a new upload never clobbers the file the current
/// record points to. The replaced file is deleted once the record moves on.
pub fn deliverable_key(team_numero: i32, kind: DeliverableType, bytes: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(bytes));
    format!(
        "{}/{}-{}.pdf",
        team_numero,
        kind.as_str(),
        &digest[..BLOB_HASH_PREFIX_LEN]
    )
}

/// Blob store on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a key below the root, refusing anything that could escape it
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let relative = Path::new(key);
        let safe = relative.components().all(|c| matches!(c, std::path::Component::Normal(_)));
        if !safe || key.is_empty() {
            return Err(AppError::Validation(format!("Invalid storage key: {}", key)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> AppResult<String> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::StorageUnavailable(format!("Failed to create directory: {}", e))
            })?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("Failed to write file: {}", e)))?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Blob stored");

        Ok(path.to_string_lossy().into_owned())
    }

    async fn delete(&self, location: &str) -> AppResult<()> {
        let key = Path::new(location)
            .strip_prefix(&self.root)
            .map_err(|_| AppError::Validation(format!("Location outside storage root: {}", location)))?;
        let path = self.resolve(&key.to_string_lossy())?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Blob removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageUnavailable(format!("Failed to remove file: {}", e))),
        }
    }
}
