//! Unit tests for the in-memory storage adapter.

use crate::clock::ManualClock;
use crate::error::ErrorKind;
use crate::storage::{
    adapters::memory::InMemoryStorage,
    domain::{ObjectKey, UploadOptions, UrlSigner},
    ports::ObjectStorage,
};
use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn storage() -> InMemoryStorage {
    InMemoryStorage::new().expect("default storage")
}

fn key(raw: &str) -> ObjectKey {
    ObjectKey::new(raw).expect("valid key")
}

#[rstest]
#[tokio::test]
async fn upload_records_content_type(storage: InMemoryStorage) {
    storage
        .upload(
            &key("img/logo.svg"),
            "<svg/>".into(),
            UploadOptions::default().with_content_type("image/svg+xml"),
        )
        .await
        .expect("upload should succeed");

    let listed = storage.list("img/").await.expect("list should succeed");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content_type.as_deref(), Some("image/svg+xml"));
    assert_eq!(listed[0].size, 6);
}

#[rstest]
#[tokio::test]
async fn missing_download_is_not_found(storage: InMemoryStorage) {
    let err = storage
        .download(&key("absent.txt"))
        .await
        .expect_err("download must fail");

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test]
async fn reupload_replaces_content_and_timestamp() {
    let start = Utc
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid instant");
    let clock = ManualClock::new(start);
    let signer = UrlSigner::new("memory://objects", b"secret", Duration::minutes(5))
        .expect("valid signer");
    let storage = InMemoryStorage::with_signer(signer, Arc::new(clock.clone()));
    let target = key("notes.txt");

    storage
        .upload(&target, "first".into(), UploadOptions::default())
        .await
        .expect("upload should succeed");
    clock.advance(Duration::minutes(1));
    storage
        .upload(&target, "second".into(), UploadOptions::default())
        .await
        .expect("upload should succeed");

    let bytes = storage.download(&target).await.expect("download");
    let listed = storage.list("").await.expect("list");

    assert_eq!(bytes, b"second");
    assert_eq!(listed[0].last_modified, start + Duration::minutes(1));
    assert_eq!(storage.len(), 1);
}

#[rstest]
#[tokio::test]
async fn signed_url_verifies_with_store_signer(storage: InMemoryStorage) {
    let target = key("docs/readme.md");

    let url = storage.signed_url(&target).await.expect("signed url");

    assert!(url.starts_with("memory://objects/docs/readme.md?"));
    assert!(storage.signer().verify_url(&target, &url, Utc::now()));
}
