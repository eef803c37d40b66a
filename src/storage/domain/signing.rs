//! HMAC-signed, time-bounded object URLs.

use super::{ObjectKey, StorageDomainError};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of a signed URL, in seconds, when none is configured.
pub const DEFAULT_URL_TTL_SECS: i64 = 3_600;

/// Longest accepted signed URL lifetime, in seconds (7 days).
pub const MAX_URL_TTL_SECS: i64 = 7 * 24 * 60 * 60;

const EXPIRES_PARAM: &str = "expires";
const SIGNATURE_PARAM: &str = "signature";

/// Signs object URLs of the form
/// `{base}/{key}?expires={unix seconds}&signature={base64url hmac}`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use switchyard::storage::domain::{ObjectKey, UrlSigner, DEFAULT_URL_TTL_SECS};
///
/// let ttl = Duration::seconds(DEFAULT_URL_TTL_SECS);
/// let signer = UrlSigner::new("https://cdn.example.com/files", b"secret", ttl)
///     .expect("valid signer");
/// let key = ObjectKey::new("reports/q1.pdf").expect("valid key");
/// let now = Utc::now();
/// let url = signer.sign(&key, now).expect("expiry in range");
/// assert!(signer.verify_url(&key, &url, now));
/// ```
#[derive(Clone)]
pub struct UrlSigner {
    base: Url,
    mac: HmacSha256,
    ttl: Duration,
}

/// Expiry and signature recovered from a signed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrlParts {
    /// Expiry as seconds since the Unix epoch.
    pub expires: i64,
    /// Base64url-encoded signature.
    pub signature: String,
}

impl SignedUrlParts {
    /// Extracts expiry and signature from the query of `url`.
    ///
    /// Returns `None` when either parameter is missing or malformed.
    #[must_use]
    pub fn parse(url: &Url) -> Option<Self> {
        let mut expires = None;
        let mut signature = None;
        for (name, value) in url.query_pairs() {
            match name.as_ref() {
                EXPIRES_PARAM => expires = value.parse::<i64>().ok(),
                SIGNATURE_PARAM => signature = Some(value.into_owned()),
                _ => {}
            }
        }
        Some(Self {
            expires: expires?,
            signature: signature?,
        })
    }
}

impl UrlSigner {
    /// Creates a signer for URLs under `base`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageDomainError::InvalidBaseUrl`] when `base` is not an
    /// absolute hierarchical URL, [`StorageDomainError::EmptySigningSecret`]
    /// for an empty secret, or [`StorageDomainError::UrlTtlOutOfRange`] when
    /// `ttl` is not positive or exceeds [`MAX_URL_TTL_SECS`].
    pub fn new(base: &str, secret: &[u8], ttl: Duration) -> Result<Self, StorageDomainError> {
        if secret.is_empty() {
            return Err(StorageDomainError::EmptySigningSecret);
        }
        if ttl <= Duration::zero() || ttl.num_seconds() > MAX_URL_TTL_SECS {
            return Err(StorageDomainError::UrlTtlOutOfRange(ttl.num_seconds()));
        }
        let invalid = |reason: String| StorageDomainError::InvalidBaseUrl {
            base: base.to_owned(),
            reason,
        };
        let parsed = Url::parse(base).map_err(|err| invalid(err.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_owned()));
        }
        let mac = HmacSha256::new_from_slice(secret).map_err(|err| invalid(err.to_string()))?;
        Ok(Self {
            base: parsed,
            mac,
            ttl,
        })
    }

    /// Returns how long signed URLs stay valid.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a URL for `key` valid until `now + ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageDomainError::ExpiryOutOfRange`] when `now + ttl`
    /// cannot be represented.
    pub fn sign(&self, key: &ObjectKey, now: DateTime<Utc>) -> Result<String, StorageDomainError> {
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or(StorageDomainError::ExpiryOutOfRange)?
            .timestamp();
        let mut url = self.object_url(key);
        url.query_pairs_mut()
            .append_pair(EXPIRES_PARAM, &expires.to_string())
            .append_pair(SIGNATURE_PARAM, &self.signature(key, expires));
        Ok(url.into())
    }

    /// Checks a signature for `key` produced by [`UrlSigner::sign`].
    #[must_use]
    pub fn verify(&self, key: &ObjectKey, parts: &SignedUrlParts, now: DateTime<Utc>) -> bool {
        if parts.expires <= now.timestamp() {
            return false;
        }
        let Ok(signature) = URL_SAFE_NO_PAD.decode(&parts.signature) else {
            return false;
        };
        let mut mac = self.mac.clone();
        mac.update(Self::payload(key, parts.expires).as_bytes());
        mac.verify_slice(&signature).is_ok()
    }

    /// Checks that `url` is an unexpired signed URL for `key`.
    #[must_use]
    pub fn verify_url(&self, key: &ObjectKey, url: &str, now: DateTime<Utc>) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let expected = self.object_url(key);
        if parsed.scheme() != expected.scheme()
            || parsed.host_str() != expected.host_str()
            || parsed.port() != expected.port()
            || parsed.path() != expected.path()
        {
            return false;
        }
        SignedUrlParts::parse(&parsed).is_some_and(|parts| self.verify(key, &parts, now))
    }

    fn object_url(&self, key: &ObjectKey) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(key.segments());
        }
        url
    }

    fn signature(&self, key: &ObjectKey, expires: i64) -> String {
        let mut mac = self.mac.clone();
        mac.update(Self::payload(key, expires).as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    fn payload(key: &ObjectKey, expires: i64) -> String {
        format!("{key}\n{expires}")
    }
}

/// Converts a lifetime in whole seconds into a signed URL TTL.
///
/// # Errors
///
/// Returns [`StorageDomainError::UrlTtlOutOfRange`] unless
/// `1 <= seconds <= MAX_URL_TTL_SECS`.
pub fn url_ttl(seconds: i64) -> Result<Duration, StorageDomainError> {
    if !(1..=MAX_URL_TTL_SECS).contains(&seconds) {
        return Err(StorageDomainError::UrlTtlOutOfRange(seconds));
    }
    Duration::try_seconds(seconds).ok_or(StorageDomainError::UrlTtlOutOfRange(seconds))
}

impl fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSigner")
            .field("base", &self.base.as_str())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
