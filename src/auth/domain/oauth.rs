//! Single-sign-on authorization requests with PKCE (RFC 7636).

use super::AuthDomainError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

const MIN_VERIFIER_LEN: usize = 43;
const MAX_VERIFIER_LEN: usize = 128;

/// Client registration with an external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthClientConfig {
    /// The provider's authorization endpoint.
    pub authorize_url: String,
    /// Client identifier issued by the provider.
    pub client_id: String,
    /// Where the provider redirects after sign-in.
    pub redirect_uri: String,
    /// Requested scopes, joined with spaces on the wire.
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl OAuthClientConfig {
    /// Builds the authorization redirect for `state` and `code_verifier`.
    ///
    /// `state` is embedded verbatim so the callback can be correlated.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError`] when `state` is empty, the verifier does
    /// not follow RFC 7636, or the endpoint is not an absolute URL.
    pub fn authorization_url(&self, state: &str, code_verifier: &str) -> Result<Url, AuthDomainError> {
        if state.is_empty() {
            return Err(AuthDomainError::EmptyState);
        }
        let challenge = code_challenge(code_verifier)?;
        let mut url = Url::parse(&self.authorize_url).map_err(|err| {
            AuthDomainError::InvalidAuthorizeUrl {
                url: self.authorize_url.clone(),
                reason: err.to_string(),
            }
        })?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", &self.redirect_uri);
            if !self.scopes.is_empty() {
                query.append_pair("scope", &self.scopes.join(" "));
            }
            query
                .append_pair("state", state)
                .append_pair("code_challenge", &challenge)
                .append_pair("code_challenge_method", "S256");
        }
        Ok(url)
    }
}

/// Checks that `verifier` has 43–128 unreserved characters.
///
/// # Errors
///
/// Returns [`AuthDomainError::InvalidCodeVerifier`] otherwise.
pub fn validate_code_verifier(verifier: &str) -> Result<(), AuthDomainError> {
    let length_ok = (MIN_VERIFIER_LEN..=MAX_VERIFIER_LEN).contains(&verifier.len());
    let charset_ok = verifier
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_' | '~'));
    if length_ok && charset_ok {
        Ok(())
    } else {
        Err(AuthDomainError::InvalidCodeVerifier)
    }
}

/// Derives the S256 code challenge: `BASE64URL(SHA256(verifier))`.
///
/// # Errors
///
/// Returns [`AuthDomainError::InvalidCodeVerifier`] for a malformed verifier.
pub fn code_challenge(verifier: &str) -> Result<String, AuthDomainError> {
    validate_code_verifier(verifier)?;
    let digest = Sha256::digest(verifier.as_bytes());
    Ok(URL_SAFE_NO_PAD.encode(digest))
}
