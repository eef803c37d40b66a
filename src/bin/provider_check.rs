//! Smoke-tests the providers selected by a configuration file.
//!
//! Usage:
//!
//! ```text
//! provider_check <config-path>
//! ```
//!
//! The JSON document at `config-path` must deserialise into a
//! [`ProviderConfig`]. A representative document is:
//!
//! ```json
//! {
//!   "storage": {
//!     "backend": "filesystem",
//!     "root": "/tmp/objects",
//!     "base_url": "http://localhost:8080/files"
//!   },
//!   "events": { "backend": "outbox", "directory": "/tmp/outbox" }
//! }
//! ```
//!
//! Each capability gets one short round trip. Results are logged through
//! `tracing`; set `RUST_LOG` to adjust verbosity. The process exits with a
//! failure status when any check fails.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::json;
use std::env;
use switchyard::auth::domain::UserId;
use switchyard::email::domain::EmailMessage;
use switchyard::events::domain::{DomainEvent, UserCreated};
use switchyard::providers::{ConfigError, ProviderCell, ProviderConfig, ProviderError, Providers};
use switchyard::queue::domain::{QueueName, ReceiveOptions};
use switchyard::storage::domain::{ObjectKey, UploadOptions};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while checking providers.
#[derive(Debug, Error)]
enum CheckError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("{failed} of {total} provider checks failed")]
    ChecksFailed { failed: usize, total: usize },
}

/// Outcome of one capability check.
#[derive(Debug)]
struct CheckOutcome {
    capability: &'static str,
    result: Result<String, String>,
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = collect_args()?;
    run(args.into_iter()).map_err(|err| {
        error!(error = %err, "provider check failed");
        err.into()
    })
}

fn collect_args() -> Result<Vec<Utf8PathBuf>, CheckError> {
    env::args_os()
        .map(|arg_os| {
            let arg = arg_os
                .into_string()
                .map_err(|_| CheckError::InvalidArgs("argument is not valid UTF-8".into()))?;
            Ok(Utf8PathBuf::from(arg))
        })
        .collect()
}

fn parse_args(mut args: impl Iterator<Item = Utf8PathBuf>) -> Result<Utf8PathBuf, CheckError> {
    let _program = args.next();
    let config_path = args
        .next()
        .ok_or_else(|| CheckError::InvalidArgs("missing config path argument".into()))?;
    if let Some(extra) = args.next() {
        let extra_arg = extra.as_str();
        return Err(CheckError::InvalidArgs(format!(
            "unexpected extra argument: {extra_arg}"
        )));
    }
    Ok(config_path)
}

fn build_runtime() -> Result<tokio::runtime::Runtime, CheckError> {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CheckError::RuntimeInit)
}

fn run(args: impl Iterator<Item = Utf8PathBuf>) -> Result<(), CheckError> {
    let config_path = parse_args(args)?;
    let config = load_config(&config_path)?;
    let runtime = build_runtime()?;
    let outcomes = runtime.block_on(async {
        let providers = ProviderCell::global().get_or_build(&config).await?;
        Ok::<_, CheckError>(check_all(providers).await)
    })?;
    summarise(&outcomes)
}

fn load_config(path: &Utf8Path) -> Result<ProviderConfig, CheckError> {
    let config = ProviderConfig::load(path)?;
    info!(
        path = %path,
        queue = config.queue.backend_name(),
        email = config.email.backend_name(),
        storage = config.storage.backend_name(),
        auth = config.auth.backend_name(),
        events = config.events.backend_name(),
        "configuration loaded"
    );
    Ok(config)
}

async fn check_all(providers: &Providers) -> Vec<CheckOutcome> {
    vec![
        CheckOutcome {
            capability: "queue",
            result: check_queue(providers).await,
        },
        CheckOutcome {
            capability: "storage",
            result: check_storage(providers).await,
        },
        CheckOutcome {
            capability: "auth",
            result: check_auth(providers).await,
        },
        CheckOutcome {
            capability: "events",
            result: check_events(providers).await,
        },
        CheckOutcome {
            capability: "email",
            result: check_email(providers).await,
        },
    ]
}

fn summarise(outcomes: &[CheckOutcome]) -> Result<(), CheckError> {
    let mut failed = 0;
    for outcome in outcomes {
        match &outcome.result {
            Ok(detail) => info!(capability = outcome.capability, %detail, "check passed"),
            Err(reason) => {
                failed += 1;
                error!(capability = outcome.capability, %reason, "check failed");
            }
        }
    }
    if failed == 0 {
        info!(total = outcomes.len(), "all provider checks passed");
        Ok(())
    } else {
        Err(CheckError::ChecksFailed {
            failed,
            total: outcomes.len(),
        })
    }
}

async fn check_queue(providers: &Providers) -> Result<String, String> {
    let name = QueueName::new(format!("provider-check-{}", Uuid::new_v4().simple()))
        .map_err(|err| err.to_string())?;
    let id = providers
        .queue
        .send(&name, json!({"check": true}))
        .await
        .map_err(|err| err.to_string())?;
    let received = providers
        .queue
        .receive(&name, ReceiveOptions::default())
        .await
        .map_err(|err| err.to_string())?;
    providers
        .queue
        .purge(&name)
        .await
        .map_err(|err| err.to_string())?;
    if received.iter().any(|message| message.id() == id) {
        Ok(format!("message {id} round-tripped through {name}"))
    } else {
        Err(format!("message {id} was not received from {name}"))
    }
}

async fn check_storage(providers: &Providers) -> Result<String, String> {
    let key = ObjectKey::new(format!("provider-check/{}", Uuid::new_v4()))
        .map_err(|err| err.to_string())?;
    let payload = b"provider-check".to_vec();
    providers
        .storage
        .upload(&key, payload.clone().into(), UploadOptions::default())
        .await
        .map_err(|err| err.to_string())?;
    let downloaded = providers
        .storage
        .download(&key)
        .await
        .map_err(|err| err.to_string())?;
    let url = providers
        .storage
        .signed_url(&key)
        .await
        .map_err(|err| err.to_string())?;
    providers
        .storage
        .delete(&key)
        .await
        .map_err(|err| err.to_string())?;
    if downloaded == payload {
        Ok(format!("object {key} round-tripped, signed url {url}"))
    } else {
        Err(format!("object {key} came back altered"))
    }
}

async fn check_auth(providers: &Providers) -> Result<String, String> {
    let user = UserId::new("provider-check").map_err(|err| err.to_string())?;
    let session = providers
        .auth
        .create_session(&user)
        .await
        .map_err(|err| err.to_string())?;
    let validated = providers
        .auth
        .validate_session(session.id())
        .await
        .map_err(|err| err.to_string())?;
    providers
        .auth
        .invalidate_session(session.id())
        .await
        .map_err(|err| err.to_string())?;
    let after = providers
        .auth
        .validate_session(session.id())
        .await
        .map_err(|err| err.to_string())?;
    match (validated, after) {
        (Some(_), None) => Ok(format!("session {} created and invalidated", session.id())),
        (None, _) => Err("fresh session did not validate".to_owned()),
        (Some(_), Some(_)) => Err("invalidated session still validates".to_owned()),
    }
}

async fn check_events(providers: &Providers) -> Result<String, String> {
    let event = DomainEvent::UserCreated(UserCreated {
        user_id: "provider-check".to_owned(),
        email: "provider-check@example.com".to_owned(),
    });
    providers
        .events
        .publish(&event)
        .await
        .map_err(|err| err.to_string())?;
    Ok(format!(
        "published {} (subscribe supported: {})",
        event.event_type(),
        providers.events.supports_subscribe()
    ))
}

async fn check_email(providers: &Providers) -> Result<String, String> {
    let message = EmailMessage::new(
        "provider-check@example.com",
        "Provider check",
        "<p>Provider check</p>",
    );
    let sent = providers
        .email
        .send(&message)
        .await
        .map_err(|err| err.to_string())?;
    Ok(format!("email {} accepted", sent.id()))
}
