//! Provider configuration.
//!
//! A configuration document is JSON with one optional section per
//! capability. Each section names its adapter in a `backend` field:
//!
//! ```json
//! {
//!   "queue": { "backend": "memory" },
//!   "email": { "backend": "log", "default_from": "noreply@example.com" },
//!   "storage": {
//!     "backend": "filesystem",
//!     "root": "/var/lib/app/objects",
//!     "base_url": "https://files.example.com"
//!   },
//!   "auth": { "backend": "mock", "session_ttl_secs": 3600 },
//!   "events": { "backend": "outbox", "directory": "/var/lib/app/outbox" }
//! }
//! ```
//!
//! Missing sections fall back to the in-memory adapters.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::auth::adapters::memory::mock_oauth_client;
use crate::auth::domain::{DEFAULT_SESSION_TTL_SECS, OAuthClientConfig, UserSnapshot, session_ttl};
use crate::storage::domain::{DEFAULT_URL_TTL_SECS, url_ttl};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read provider config {path}: {source}")]
    Read {
        /// The path that was read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not valid configuration JSON.
    #[error("failed to parse provider config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the adapters cannot use.
    #[error("invalid provider config field {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Queue adapter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case", deny_unknown_fields)]
pub enum QueueConfig {
    /// In-process FIFO queues.
    #[default]
    Memory,
}

/// Email adapter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case", deny_unknown_fields)]
pub enum EmailConfig {
    /// Records messages in memory.
    #[default]
    Memory,
    /// Writes messages to the log.
    Log {
        /// Sender used when a message has no `from`.
        default_from: String,
    },
}

/// Object storage adapter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case", deny_unknown_fields)]
pub enum StorageConfig {
    /// Objects held in process memory.
    Memory {
        /// Base of generated access URLs.
        #[serde(default)]
        base_url: Option<String>,
        /// HMAC secret for access URLs. Random per process when absent.
        #[serde(default)]
        signing_secret: Option<String>,
        /// Lifetime of access URLs.
        #[serde(default = "default_url_ttl_secs")]
        url_ttl_secs: i64,
    },
    /// Objects stored under a local directory.
    Filesystem {
        /// Root directory, created when missing.
        root: Utf8PathBuf,
        /// Base of generated access URLs.
        base_url: String,
        /// HMAC secret for access URLs. Random per process when absent.
        #[serde(default)]
        signing_secret: Option<String>,
        /// Lifetime of access URLs.
        #[serde(default = "default_url_ttl_secs")]
        url_ttl_secs: i64,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Memory {
            base_url: None,
            signing_secret: None,
            url_ttl_secs: DEFAULT_URL_TTL_SECS,
        }
    }
}

/// Auth adapter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case", deny_unknown_fields)]
pub enum AuthConfig {
    /// In-memory sessions.
    Mock {
        /// Session lifetime.
        #[serde(default = "default_session_ttl_secs")]
        session_ttl_secs: i64,
        /// Users pre-registered with the provider.
        #[serde(default)]
        users: Vec<UserSnapshot>,
        /// Identity provider client used for authorization URLs.
        #[serde(default = "mock_oauth_client")]
        oauth: OAuthClientConfig,
    },
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::Mock {
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            users: Vec::new(),
            oauth: mock_oauth_client(),
        }
    }
}

/// Event bus adapter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case", deny_unknown_fields)]
pub enum EventsConfig {
    /// In-process publish/subscribe.
    #[default]
    Memory,
    /// Forward envelopes to a JSON lines outbox.
    Outbox {
        /// Directory holding the outbox file.
        directory: Utf8PathBuf,
        /// Prefix prepended to envelope sources.
        #[serde(default)]
        source_prefix: Option<String>,
    },
}

const fn default_url_ttl_secs() -> i64 {
    DEFAULT_URL_TTL_SECS
}

const fn default_session_ttl_secs() -> i64 {
    DEFAULT_SESSION_TTL_SECS
}

/// Adapter choice for every capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Queue section.
    pub queue: QueueConfig,
    /// Email section.
    pub email: EmailConfig,
    /// Storage section.
    pub storage: StorageConfig,
    /// Auth section.
    pub auth: AuthConfig,
    /// Events section.
    pub events: EventsConfig,
}

impl ProviderConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields,
    /// and [`ConfigError::Invalid`] when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`ProviderConfig::from_json_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = read_config_file(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let EmailConfig::Log { default_from } = &self.email {
            require_non_empty("email.default_from", default_from)?;
        }
        self.validate_storage()?;
        self.validate_auth()?;
        if let EventsConfig::Outbox { directory, .. } = &self.events {
            require_non_empty("events.directory", directory.as_str())?;
        }
        Ok(())
    }

    fn validate_storage(&self) -> Result<(), ConfigError> {
        let (base_url, signing_secret, url_ttl_secs) = match &self.storage {
            StorageConfig::Memory {
                base_url,
                signing_secret,
                url_ttl_secs,
            } => (base_url.as_deref(), signing_secret, *url_ttl_secs),
            StorageConfig::Filesystem {
                root,
                base_url,
                signing_secret,
                url_ttl_secs,
            } => {
                require_non_empty("storage.root", root.as_str())?;
                (Some(base_url.as_str()), signing_secret, *url_ttl_secs)
            }
        };
        if let Some(base) = base_url {
            Url::parse(base).map_err(|err| ConfigError::invalid("storage.base_url", err.to_string()))?;
        }
        if let Some(secret) = signing_secret {
            require_non_empty("storage.signing_secret", secret)?;
        }
        url_ttl(url_ttl_secs)
            .map_err(|err| ConfigError::invalid("storage.url_ttl_secs", err.to_string()))?;
        Ok(())
    }

    fn validate_auth(&self) -> Result<(), ConfigError> {
        let AuthConfig::Mock {
            session_ttl_secs,
            oauth,
            ..
        } = &self.auth;
        session_ttl(*session_ttl_secs)
            .map_err(|err| ConfigError::invalid("auth.session_ttl_secs", err.to_string()))?;
        Url::parse(&oauth.authorize_url)
            .map_err(|err| ConfigError::invalid("auth.oauth.authorize_url", err.to_string()))?;
        require_non_empty("auth.oauth.client_id", &oauth.client_id)
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    Ok(())
}

fn read_config_file(path: &Utf8Path) -> io::Result<String> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(file_name)
}

impl QueueConfig {
    /// Name of the selected adapter.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
        }
    }
}

impl EmailConfig {
    /// Name of the selected adapter.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Log { .. } => "log",
        }
    }
}

impl StorageConfig {
    /// Name of the selected adapter.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory { .. } => "memory",
            Self::Filesystem { .. } => "filesystem",
        }
    }
}

impl AuthConfig {
    /// Name of the selected adapter.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Mock { .. } => "mock",
        }
    }
}

impl EventsConfig {
    /// Name of the selected adapter.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Outbox { .. } => "outbox",
        }
    }
}
