//! Unit tests for provider construction.

use crate::auth::domain::UserId;
use crate::email::domain::EmailMessage;
use crate::events::domain::{DomainEvent, UserCreated};
use crate::providers::{ConfigError, MockProviders, ProviderConfig, ProviderError, build_providers};
use crate::queue::domain::{QueueName, ReceiveOptions};
use crate::storage::domain::{ObjectKey, UploadOptions};
use camino::Utf8PathBuf;
use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

#[rstest]
#[tokio::test]
async fn default_config_builds_working_providers() {
    let providers = build_providers(&ProviderConfig::default()).expect("providers build");
    let queue = QueueName::new("jobs").expect("valid name");

    providers
        .queue
        .send(&queue, json!({"n": 1}))
        .await
        .expect("send");
    let received = providers
        .queue
        .receive(&queue, ReceiveOptions::default())
        .await
        .expect("receive");

    assert_eq!(received.len(), 1);
    assert!(providers.events.supports_subscribe());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn local_backends_are_built_from_config() {
    let scratch = TempDir::new().expect("temporary directory");
    let base = Utf8PathBuf::from_path_buf(scratch.path().to_path_buf())
        .expect("temporary path is UTF-8");
    let config = ProviderConfig::from_json_str(
        &json!({
            "email": {"backend": "log", "default_from": "noreply@example.com"},
            "storage": {
                "backend": "filesystem",
                "root": base.join("objects"),
                "base_url": "http://localhost/files",
                "signing_secret": "s3cret"
            },
            "auth": {"backend": "mock", "users": [{"id": "u-1", "email": "ada@example.com"}]},
            "events": {"backend": "outbox", "directory": base.join("outbox")}
        })
        .to_string(),
    )
    .expect("config is valid");

    let providers = build_providers(&config).expect("providers build");

    let key = ObjectKey::new("docs/readme.txt").expect("valid key");
    providers
        .storage
        .upload(&key, "hello".into(), UploadOptions::default())
        .await
        .expect("upload");
    assert!(base.join("objects/docs/readme.txt").exists());

    let session = providers
        .auth
        .create_session(&UserId::new("u-1").expect("valid id"))
        .await
        .expect("session");
    assert_eq!(session.user().email.as_deref(), Some("ada@example.com"));

    providers
        .email
        .send(&EmailMessage::new("bob@example.com", "Hi", "<p>Hi</p>"))
        .await
        .expect("log sender accepts");

    assert!(!providers.events.supports_subscribe());
    providers
        .events
        .publish(&DomainEvent::UserCreated(UserCreated {
            user_id: "u-1".to_owned(),
            email: "ada@example.com".to_owned(),
        }))
        .await
        .expect("publish");
    assert!(base.join("outbox/events.jsonl").exists());
}

#[rstest]
#[tokio::test]
async fn mock_bundle_shares_state_with_its_ports() {
    let mocks = MockProviders::new().expect("mocks build");
    let providers = mocks.providers();

    providers
        .email
        .send(&EmailMessage::new("ada@example.com", "Welcome", "<p>Hello</p>"))
        .await
        .expect("send");

    assert_eq!(
        mocks.email.last_sent().map(|sent| sent.subject().to_owned()),
        Some("Welcome".to_owned())
    );

    let storage = mocks.storage.clone();
    let bundle = mocks.into_providers();
    bundle
        .storage
        .upload(
            &ObjectKey::new("a.txt").expect("valid key"),
            "x".into(),
            UploadOptions::default(),
        )
        .await
        .expect("upload");
    assert_eq!(storage.len(), 1);
}

#[rstest]
#[case(r#"{"auth": {"backend": "mock", "session_ttl_secs": 9223372036854775807}}"#)]
#[case(r#"{"storage": {"backend": "memory", "url_ttl_secs": 9000000000000}}"#)]
fn oversized_ttls_are_rejected_before_any_adapter_is_built(#[case] json: &str) {
    let config: ProviderConfig = serde_json::from_str(json).expect("document parses");

    let result = build_providers(&config);

    assert!(
        matches!(result, Err(ProviderError::Config(ConfigError::Invalid { .. }))),
        "{result:?}"
    );
}
