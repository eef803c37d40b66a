//! Unit tests for the filesystem storage adapter.

use crate::error::ErrorKind;
use crate::storage::{
    adapters::filesystem::FilesystemStorage,
    domain::{ObjectKey, UploadOptions, UrlSigner},
    ports::ObjectStorage,
};
use camino::Utf8PathBuf;
use chrono::Duration;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Harness {
    _scratch: TempDir,
    root: Utf8PathBuf,
    storage: FilesystemStorage,
}

#[fixture]
fn harness() -> Harness {
    let scratch = TempDir::new().expect("temporary directory");
    let root = Utf8PathBuf::from_path_buf(scratch.path().join("objects"))
        .expect("temporary path is UTF-8");
    let signer = UrlSigner::new("http://localhost:8080/files", b"secret", Duration::minutes(5))
        .expect("valid signer");
    let storage = FilesystemStorage::open(&root, signer).expect("storage opens");
    Harness {
        _scratch: scratch,
        root,
        storage,
    }
}

fn key(raw: &str) -> ObjectKey {
    ObjectKey::new(raw).expect("valid key")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nested_keys_become_directories(harness: Harness) {
    harness
        .storage
        .upload(&key("a/b/c.txt"), "nested".into(), UploadOptions::default())
        .await
        .expect("upload should succeed");

    let on_disk =
        std::fs::read(harness.root.join("a/b/c.txt/@data")).expect("file exists on disk");
    assert_eq!(on_disk, b"nested");
    assert_eq!(harness.storage.root(), harness.root.as_path());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn binary_content_round_trips(harness: Harness) {
    let payload: Vec<u8> = (0..=255).collect();

    harness
        .storage
        .upload(&key("bin/all-bytes"), payload.clone().into(), UploadOptions::default())
        .await
        .expect("upload should succeed");
    let downloaded = harness
        .storage
        .download(&key("bin/all-bytes"))
        .await
        .expect("download should succeed");

    assert_eq!(downloaded, payload);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_key_is_not_an_object(harness: Harness) {
    harness
        .storage
        .upload(&key("dir/file.txt"), "x".into(), UploadOptions::default())
        .await
        .expect("upload should succeed");

    assert!(!harness.storage.exists(&key("dir")).await.expect("exists"));
    let err = harness
        .storage
        .download(&key("dir"))
        .await
        .expect_err("directory is not downloadable");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_prunes_empty_directories(harness: Harness) {
    harness
        .storage
        .upload(&key("tmp/deep/one.txt"), "1".into(), UploadOptions::default())
        .await
        .expect("upload should succeed");

    harness
        .storage
        .delete(&key("tmp/deep/one.txt"))
        .await
        .expect("delete should succeed");

    assert!(!harness.root.join("tmp").exists());
    harness
        .storage
        .delete(&key("tmp/deep/one.txt"))
        .await
        .expect("repeated delete is a no-op");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_matches_raw_prefix_across_directories(harness: Harness) {
    for raw in ["test/a.txt", "test/b.txt", "testing.txt", "other/c.txt"] {
        harness
            .storage
            .upload(&key(raw), raw.into(), UploadOptions::default())
            .await
            .expect("upload should succeed");
    }

    let listed = harness.storage.list("test").await.expect("list");
    let keys: Vec<&str> = listed.iter().map(|object| object.key.as_str()).collect();

    assert_eq!(keys, vec!["test/a.txt", "test/b.txt", "testing.txt"]);
    assert!(harness.storage.list("nothing/").await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signed_url_points_at_configured_base(harness: Harness) {
    let target = key("public/index.html");

    let url = harness.storage.signed_url(&target).await.expect("signed url");

    assert!(url.starts_with("http://localhost:8080/files/public/index.html?expires="));
    assert!(harness.storage.signer().verify_url(&target, &url, chrono::Utc::now()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn object_key_can_also_be_a_parent(harness: Harness) {
    harness
        .storage
        .upload(&key("a"), "parent".into(), UploadOptions::default())
        .await
        .expect("parent upload should succeed");
    harness
        .storage
        .upload(&key("a/b"), "child".into(), UploadOptions::default())
        .await
        .expect("child upload should succeed");

    assert_eq!(harness.storage.download(&key("a")).await.expect("download"), b"parent");
    assert_eq!(harness.storage.download(&key("a/b")).await.expect("download"), b"child");
    let listed = harness.storage.list("a").await.expect("list");
    let keys: Vec<&str> = listed.iter().map(|object| object.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "a/b"]);

    harness
        .storage
        .delete(&key("a"))
        .await
        .expect("delete should succeed");
    assert!(!harness.storage.exists(&key("a")).await.expect("exists"));
    assert!(harness.storage.exists(&key("a/b")).await.expect("exists"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reserved_looking_segments_are_plain_keys(harness: Harness) {
    for raw in ["x/@data", "x/@@y", "x"] {
        harness
            .storage
            .upload(&key(raw), raw.into(), UploadOptions::default())
            .await
            .expect("upload should succeed");
    }

    for raw in ["x/@data", "x/@@y", "x"] {
        let content = harness.storage.download(&key(raw)).await.expect("download");
        assert_eq!(content, raw.as_bytes());
    }
    let listed = harness.storage.list("x").await.expect("list");
    let keys: Vec<&str> = listed.iter().map(|object| object.key.as_str()).collect();
    assert_eq!(keys, vec!["x", "x/@@y", "x/@data"]);
}
