//! Stored object metadata.

use super::ObjectKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// The object key.
    pub key: ObjectKey,
    /// Content length in bytes.
    pub size: u64,
    /// When the content was last written.
    pub last_modified: DateTime<Utc>,
    /// MIME type, when the backend records one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}
