//! Domain model for stored objects.

mod content;
mod error;
mod key;
mod object;
mod signing;

pub use content::{ObjectContent, UploadOptions};
pub use error::StorageDomainError;
pub use key::ObjectKey;
pub use object::StoredObject;
pub use signing::{DEFAULT_URL_TTL_SECS, MAX_URL_TTL_SECS, SignedUrlParts, UrlSigner, url_ttl};
