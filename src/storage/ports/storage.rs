//! Object storage port.

use crate::error::ErrorKind;
use crate::storage::domain::{
    ObjectContent, ObjectKey, StorageDomainError, StoredObject, UploadOptions,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Blob storage contract.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - `upload` followed by `download` of the same key returns byte-identical
///   content whether it was supplied as text or bytes
/// - Re-uploading a key replaces its content
/// - `delete` of an absent key succeeds
/// - `list` of a prefix with no matches returns an empty vector
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `content` under `key`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the backend fails.
    async fn upload(
        &self,
        key: &ObjectKey,
        content: ObjectContent,
        options: UploadOptions,
    ) -> StorageResult<()>;

    /// Returns the content stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when no object exists under `key`.
    async fn download(&self, key: &ObjectKey) -> StorageResult<Vec<u8>>;

    /// Returns `true` when an object exists under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the backend fails.
    async fn exists(&self, key: &ObjectKey) -> StorageResult<bool>;

    /// Removes the object under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the backend fails.
    async fn delete(&self, key: &ObjectKey) -> StorageResult<()>;

    /// Lists objects whose key starts with `prefix`, sorted by key.
    ///
    /// The prefix is matched as a raw string, so `test` matches both
    /// `test/a.txt` and `testing.txt`. An empty prefix lists every object.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the backend fails.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<StoredObject>>;

    /// Returns a time-bounded URL granting read access to `key`.
    ///
    /// Callers must not rely on the URL format, only that it is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the backend fails.
    async fn signed_url(&self, key: &ObjectKey) -> StorageResult<String>;
}

/// Errors returned by storage implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Caller input failed domain validation.
    #[error(transparent)]
    Domain(#[from] StorageDomainError),

    /// No object exists under the key.
    #[error("object not found: {0}")]
    NotFound(ObjectKey),

    /// The backend failed.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps a backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Backend(_) => ErrorKind::BackendUnavailable,
        }
    }
}
