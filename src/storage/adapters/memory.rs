//! In-memory implementation of the [`ObjectStorage`] port.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::error::poisoned;
use crate::storage::{
    domain::{
        DEFAULT_URL_TTL_SECS, ObjectContent, ObjectKey, StorageDomainError, StoredObject,
        UploadOptions, UrlSigner,
    },
    ports::{ObjectStorage, StorageError, StorageResult},
};

/// Base URL used for signed URLs when none is configured.
pub const DEFAULT_MEMORY_BASE_URL: &str = "memory://objects";

#[derive(Debug, Clone)]
struct StoredBlob {
    content: Vec<u8>,
    last_modified: DateTime<Utc>,
    content_type: Option<String>,
}

/// Thread-safe in-memory object store.
///
/// Keys are kept ordered so listings come back sorted without extra work.
#[derive(Debug, Clone)]
pub struct InMemoryStorage<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    objects: Arc<RwLock<BTreeMap<ObjectKey, StoredBlob>>>,
    signer: Arc<UrlSigner>,
    clock: Arc<C>,
}

impl InMemoryStorage<DefaultClock> {
    /// Creates an empty store with a per-instance random signing secret.
    ///
    /// # Errors
    ///
    /// Returns [`StorageDomainError`] if the default signer cannot be built.
    pub fn new() -> Result<Self, StorageDomainError> {
        let secret = uuid::Uuid::new_v4();
        let signer = UrlSigner::new(
            DEFAULT_MEMORY_BASE_URL,
            secret.as_bytes(),
            Duration::seconds(DEFAULT_URL_TTL_SECS),
        )?;
        Ok(Self::with_signer(signer, Arc::new(DefaultClock)))
    }
}

impl<C> InMemoryStorage<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store using the given signer and clock.
    #[must_use]
    pub fn with_signer(signer: UrlSigner, clock: Arc<C>) -> Self {
        Self {
            objects: Arc::new(RwLock::new(BTreeMap::new())),
            signer: Arc::new(signer),
            clock,
        }
    }

    /// Returns the signer used for access URLs.
    #[must_use]
    pub fn signer(&self) -> &UrlSigner {
        &self.signer
    }

    /// Returns the number of stored objects.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if no objects are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<C> ObjectStorage for InMemoryStorage<C>
where
    C: Clock + Send + Sync,
{
    async fn upload(
        &self,
        key: &ObjectKey,
        content: ObjectContent,
        options: UploadOptions,
    ) -> StorageResult<()> {
        let blob = StoredBlob {
            content: content.into_bytes(),
            last_modified: self.clock.utc(),
            content_type: options.content_type,
        };
        let size = blob.content.len();
        let mut guard = self
            .objects
            .write()
            .map_err(|err| StorageError::backend(poisoned(&err)))?;
        guard.insert(key.clone(), blob);
        debug!(key = %key, size, "object uploaded");
        Ok(())
    }

    async fn download(&self, key: &ObjectKey) -> StorageResult<Vec<u8>> {
        let guard = self
            .objects
            .read()
            .map_err(|err| StorageError::backend(poisoned(&err)))?;
        guard
            .get(key)
            .map(|blob| blob.content.clone())
            .ok_or_else(|| StorageError::NotFound(key.clone()))
    }

    async fn exists(&self, key: &ObjectKey) -> StorageResult<bool> {
        let guard = self
            .objects
            .read()
            .map_err(|err| StorageError::backend(poisoned(&err)))?;
        Ok(guard.contains_key(key))
    }

    async fn delete(&self, key: &ObjectKey) -> StorageResult<()> {
        let mut guard = self
            .objects
            .write()
            .map_err(|err| StorageError::backend(poisoned(&err)))?;
        if guard.remove(key).is_some() {
            debug!(key = %key, "object deleted");
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<StoredObject>> {
        let guard = self
            .objects
            .read()
            .map_err(|err| StorageError::backend(poisoned(&err)))?;
        Ok(guard
            .iter()
            .filter(|(key, _)| key.has_prefix(prefix))
            .map(|(key, blob)| StoredObject {
                key: key.clone(),
                size: blob.content.len() as u64,
                last_modified: blob.last_modified,
                content_type: blob.content_type.clone(),
            })
            .collect())
    }

    async fn signed_url(&self, key: &ObjectKey) -> StorageResult<String> {
        Ok(self.signer.sign(key, self.clock.utc())?)
    }
}
