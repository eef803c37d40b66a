//! Upload payloads and options.

/// Bytes to upload, built uniformly from text or binary input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectContent(Vec<u8>);

impl ObjectContent {
    /// Returns the payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the content and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for an empty payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ObjectContent {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for ObjectContent {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ObjectContent {
    fn from(value: &[u8; N]) -> Self {
        Self(value.to_vec())
    }
}

impl From<String> for ObjectContent {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&str> for ObjectContent {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

/// Optional upload metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadOptions {
    /// MIME type recorded with the object, where the backend supports it.
    pub content_type: Option<String>,
}

impl UploadOptions {
    /// Sets the MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
