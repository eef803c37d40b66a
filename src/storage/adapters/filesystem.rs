//! Filesystem implementation of the [`ObjectStorage`] port.
//!
//! Objects live under a root directory opened through `cap-std`, so no key
//! can escape the root. Every key maps to a directory path, one directory
//! per segment, and its content sits in a reserved `@data` file inside
//! that directory. A key can therefore be both an object and the parent of
//! other keys (`a` and `a/b`). Segments starting with `@` are stored with
//! an extra leading `@`, so no segment ever collides with `@data`.
//! Blocking I/O runs on tokio's blocking pool.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::storage::{
    domain::{ObjectContent, ObjectKey, StoredObject, UploadOptions, UrlSigner},
    ports::{ObjectStorage, StorageError, StorageResult},
};

/// Object store rooted in a local directory.
#[derive(Debug, Clone)]
pub struct FilesystemStorage<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    root: Arc<Dir>,
    root_path: Utf8PathBuf,
    signer: Arc<UrlSigner>,
    clock: Arc<C>,
}

impl FilesystemStorage<DefaultClock> {
    /// Opens (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the directory cannot be created
    /// or opened.
    pub fn open(root: &Utf8Path, signer: UrlSigner) -> StorageResult<Self> {
        Self::open_with_clock(root, signer, Arc::new(DefaultClock))
    }
}

impl<C> FilesystemStorage<C>
where
    C: Clock + Send + Sync,
{
    /// Opens (creating if needed) a store rooted at `root` using `clock` to
    /// timestamp signed URLs.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the directory cannot be created
    /// or opened.
    pub fn open_with_clock(root: &Utf8Path, signer: UrlSigner, clock: Arc<C>) -> StorageResult<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(StorageError::backend)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(StorageError::backend)?;
        Ok(Self {
            root: Arc::new(dir),
            root_path: root.to_owned(),
            signer: Arc::new(signer),
            clock,
        })
    }

    /// Returns the root directory path.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root_path
    }

    /// Returns the signer used for access URLs.
    #[must_use]
    pub fn signer(&self) -> &UrlSigner {
        &self.signer
    }
}

/// Runs a blocking filesystem operation on the blocking thread pool.
async fn run_blocking<F, T>(f: F) -> StorageResult<T>
where
    F: FnOnce() -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(StorageError::backend)?
}

const DATA_FILE: &str = "@data";
const ESCAPE: char = '@';

/// Directory holding the content of `key`, relative to the root.
fn object_dir(key: &ObjectKey) -> String {
    key.segments()
        .map(|segment| {
            if segment.starts_with(ESCAPE) {
                format!("{ESCAPE}{segment}")
            } else {
                segment.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn data_path(key: &ObjectKey) -> String {
    format!("{}/{DATA_FILE}", object_dir(key))
}

/// Recovers a key segment from a directory name, rejecting foreign names.
fn decode_segment(name: &str) -> Option<&str> {
    match name.strip_prefix(ESCAPE) {
        Some(rest) if rest.starts_with(ESCAPE) => Some(rest),
        Some(_) => None,
        None => Some(name),
    }
}

fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn is_file(dir: &Dir, key: &ObjectKey) -> StorageResult<bool> {
    match dir.metadata(data_path(key)) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(err) if is_absent(&err) => Ok(false),
        Err(err) => Err(StorageError::backend(err)),
    }
}

/// Removes the object directory of `key` and its ancestors while they are
/// empty, deepest first.
fn prune_empty_dirs(dir: &Dir, key: &ObjectKey) {
    let encoded = object_dir(key);
    let mut current = encoded.as_str();
    loop {
        if dir.remove_dir(current).is_err() {
            break;
        }
        match current.rsplit_once('/') {
            Some((parent, _)) => current = parent,
            None => break,
        }
    }
}

/// Walks `dir` collecting objects whose key starts with `prefix`.
///
/// `base` is the decoded key of `dir`, empty at the root. Subdirectories
/// that cannot contain a matching key are skipped.
fn collect_objects(
    dir: &Dir,
    base: &str,
    prefix: &str,
    found: &mut Vec<StoredObject>,
) -> io::Result<()> {
    for item in dir.entries()? {
        let entry = item?;
        let name = entry.file_name()?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            let Some(segment) = decode_segment(&name) else {
                continue;
            };
            let path = if base.is_empty() {
                segment.to_owned()
            } else {
                format!("{base}/{segment}")
            };
            if path.starts_with(prefix) || prefix.starts_with(&path) {
                let child = entry.open_dir()?;
                collect_objects(&child, &path, prefix, found)?;
            }
        } else if file_type.is_file() && name == DATA_FILE && base.starts_with(prefix) {
            let Ok(key) = ObjectKey::new(base) else {
                continue;
            };
            let metadata = entry.metadata()?;
            let modified = metadata.modified()?.into_std();
            found.push(StoredObject {
                key,
                size: metadata.len(),
                last_modified: DateTime::<Utc>::from(modified),
                content_type: None,
            });
        }
    }
    Ok(())
}

#[async_trait]
impl<C> ObjectStorage for FilesystemStorage<C>
where
    C: Clock + Send + Sync,
{
    async fn upload(
        &self,
        key: &ObjectKey,
        content: ObjectContent,
        _options: UploadOptions,
    ) -> StorageResult<()> {
        let dir = Arc::clone(&self.root);
        let target = key.clone();
        let bytes = content.into_bytes();
        let size = bytes.len();
        run_blocking(move || {
            dir.create_dir_all(object_dir(&target))
                .map_err(StorageError::backend)?;
            dir.write(data_path(&target), &bytes)
                .map_err(StorageError::backend)
        })
        .await?;
        debug!(key = %key, size, root = %self.root_path, "object written");
        Ok(())
    }

    async fn download(&self, key: &ObjectKey) -> StorageResult<Vec<u8>> {
        let dir = Arc::clone(&self.root);
        let target = key.clone();
        run_blocking(move || {
            if !is_file(&dir, &target)? {
                return Err(StorageError::NotFound(target));
            }
            match dir.read(data_path(&target)) {
                Ok(bytes) => Ok(bytes),
                Err(err) if is_absent(&err) => Err(StorageError::NotFound(target)),
                Err(err) => Err(StorageError::backend(err)),
            }
        })
        .await
    }

    async fn exists(&self, key: &ObjectKey) -> StorageResult<bool> {
        let dir = Arc::clone(&self.root);
        let target = key.clone();
        run_blocking(move || is_file(&dir, &target)).await
    }

    async fn delete(&self, key: &ObjectKey) -> StorageResult<()> {
        let dir = Arc::clone(&self.root);
        let target = key.clone();
        run_blocking(move || {
            if !is_file(&dir, &target)? {
                return Ok(());
            }
            match dir.remove_file(data_path(&target)) {
                Ok(()) => {
                    prune_empty_dirs(&dir, &target);
                    Ok(())
                }
                Err(err) if is_absent(&err) => Ok(()),
                Err(err) => Err(StorageError::backend(err)),
            }
        })
        .await?;
        debug!(key = %key, root = %self.root_path, "object removed");
        Ok(())
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<StoredObject>> {
        let dir = Arc::clone(&self.root);
        let wanted = prefix.to_owned();
        run_blocking(move || {
            let mut found = Vec::new();
            collect_objects(&dir, "", &wanted, &mut found).map_err(StorageError::backend)?;
            found.sort_by(|left, right| left.key.cmp(&right.key));
            Ok(found)
        })
        .await
    }

    async fn signed_url(&self, key: &ObjectKey) -> StorageResult<String> {
        Ok(self.signer.sign(key, self.clock.utc())?)
    }
}
