//! Storage conformance cases.

use std::collections::BTreeSet;

use super::{BoxFuture, CaseContext, CaseError, CaseResult, ConformanceCase, ensure, ensure_eq, fail};
use crate::error::ErrorKind;
use crate::storage::{
    domain::{ObjectKey, UploadOptions},
    ports::ObjectStorage,
};

/// The storage property table.
#[must_use]
pub fn cases() -> Vec<ConformanceCase<dyn ObjectStorage>> {
    vec![
        ConformanceCase {
            name: "text_round_trips",
            run: text_round_trips,
        },
        ConformanceCase {
            name: "binary_round_trips",
            run: binary_round_trips,
        },
        ConformanceCase {
            name: "upload_overwrites",
            run: upload_overwrites,
        },
        ConformanceCase {
            name: "exists_tracks_lifecycle",
            run: exists_tracks_lifecycle,
        },
        ConformanceCase {
            name: "object_key_can_parent_other_keys",
            run: object_key_can_parent_other_keys,
        },
        ConformanceCase {
            name: "delete_is_idempotent",
            run: delete_is_idempotent,
        },
        ConformanceCase {
            name: "missing_download_is_not_found",
            run: missing_download_is_not_found,
        },
        ConformanceCase {
            name: "list_matches_prefix_exactly",
            run: list_matches_prefix_exactly,
        },
        ConformanceCase {
            name: "list_without_matches_is_empty",
            run: list_without_matches_is_empty,
        },
        ConformanceCase {
            name: "list_reports_sizes",
            run: list_reports_sizes,
        },
        ConformanceCase {
            name: "signed_url_is_not_empty",
            run: signed_url_is_not_empty,
        },
    ]
}

fn key(raw: &str) -> Result<ObjectKey, CaseError> {
    ObjectKey::new(raw).context("object key")
}

fn text_round_trips(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let target = key("docs/hello.txt")?;
        let text = "héllo, wörld\n";
        storage
            .upload(&target, text.into(), UploadOptions::default().with_content_type("text/plain"))
            .await
            .context("upload")?;

        let bytes = storage.download(&target).await.context("download")?;
        ensure_eq("content", bytes.as_slice(), text.as_bytes())
    })
}

fn binary_round_trips(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let target = key("bin/all-bytes")?;
        let payload: Vec<u8> = (0..=255).collect();
        storage
            .upload(&target, payload.clone().into(), UploadOptions::default())
            .await
            .context("upload")?;

        let bytes = storage.download(&target).await.context("download")?;
        ensure_eq("content", &bytes, &payload)
    })
}

fn upload_overwrites(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let target = key("notes.txt")?;
        storage
            .upload(&target, "first".into(), UploadOptions::default())
            .await
            .context("first upload")?;
        storage
            .upload(&target, "second".into(), UploadOptions::default())
            .await
            .context("second upload")?;

        let bytes = storage.download(&target).await.context("download")?;
        ensure_eq("content", bytes.as_slice(), b"second".as_slice())
    })
}

fn exists_tracks_lifecycle(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let target = key("lifecycle/item")?;
        ensure_eq(
            "exists before upload",
            &storage.exists(&target).await.context("exists")?,
            &false,
        )?;
        storage
            .upload(&target, "x".into(), UploadOptions::default())
            .await
            .context("upload")?;
        ensure_eq(
            "exists after upload",
            &storage.exists(&target).await.context("exists")?,
            &true,
        )?;
        storage.delete(&target).await.context("delete")?;
        ensure_eq(
            "exists after delete",
            &storage.exists(&target).await.context("exists")?,
            &false,
        )
    })
}

fn object_key_can_parent_other_keys(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let parent = key("tree")?;
        let child = key("tree/leaf")?;
        storage
            .upload(&parent, "parent".into(), UploadOptions::default())
            .await
            .context("upload parent")?;
        storage
            .upload(&child, "child".into(), UploadOptions::default())
            .await
            .context("upload child under an object key")?;

        let parent_bytes = storage.download(&parent).await.context("download parent")?;
        ensure_eq("parent content", parent_bytes.as_slice(), b"parent".as_slice())?;
        let child_bytes = storage.download(&child).await.context("download child")?;
        ensure_eq("child content", child_bytes.as_slice(), b"child".as_slice())?;

        storage.delete(&parent).await.context("delete parent")?;
        ensure_eq(
            "child survives parent delete",
            &storage.exists(&child).await.context("exists")?,
            &true,
        )
    })
}

fn delete_is_idempotent(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let target = key("never/uploaded")?;
        storage.delete(&target).await.context("delete absent")?;
        storage
            .upload(&target, "x".into(), UploadOptions::default())
            .await
            .context("upload")?;
        storage.delete(&target).await.context("delete")?;
        storage.delete(&target).await.context("repeated delete")
    })
}

fn missing_download_is_not_found(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        match storage.download(&key("missing/object")?).await {
            Ok(bytes) => Err(fail(format!("downloaded {} byte(s) of a missing key", bytes.len()))),
            Err(err) => ensure_eq("error kind", &err.kind(), &ErrorKind::NotFound),
        }
    })
}

fn list_matches_prefix_exactly(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        for raw in ["test/a.txt", "test/b.txt", "testing/c.txt", "other/d.txt"] {
            storage
                .upload(&key(raw)?, raw.into(), UploadOptions::default())
                .await
                .context("upload")?;
        }

        let listed: BTreeSet<String> = storage
            .list("test/")
            .await
            .context("list test/")?
            .into_iter()
            .map(|object| object.key.as_str().to_owned())
            .collect();
        let expected: BTreeSet<String> = ["test/a.txt", "test/b.txt"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        ensure_eq("keys under test/", &listed, &expected)?;

        let broad: BTreeSet<String> = storage
            .list("test")
            .await
            .context("list test")?
            .into_iter()
            .map(|object| object.key.as_str().to_owned())
            .collect();
        let expected_broad: BTreeSet<String> = ["test/a.txt", "test/b.txt", "testing/c.txt"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        ensure_eq("keys under test", &broad, &expected_broad)
    })
}

fn list_without_matches_is_empty(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        storage
            .upload(&key("present.txt")?, "x".into(), UploadOptions::default())
            .await
            .context("upload")?;
        let listed = storage.list("absent/").await.context("list")?;
        ensure(listed.is_empty(), || {
            format!("expected no objects, got {}", listed.len())
        })
    })
}

fn list_reports_sizes(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        storage
            .upload(&key("sized/five")?, "12345".into(), UploadOptions::default())
            .await
            .context("upload")?;
        let listed = storage.list("sized/").await.context("list")?;
        let sizes: Vec<u64> = listed.iter().map(|object| object.size).collect();
        ensure_eq("sizes", &sizes, &vec![5])
    })
}

fn signed_url_is_not_empty(storage: &dyn ObjectStorage) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let target = key("shared/report.pdf")?;
        storage
            .upload(&target, "pdf".into(), UploadOptions::default())
            .await
            .context("upload")?;
        let url = storage.signed_url(&target).await.context("signed url")?;
        ensure(!url.trim().is_empty(), || "signed URL is empty".to_owned())
    })
}
