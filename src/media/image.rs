use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// A photo stored as a `data:<mime>;base64,<payload>` URL.
///
/// Records written by older clients may hold bare base64 without the data URL
/// prefix; those are read as PNG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(String);

impl ImagePayload {
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self(format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)))
    }

    pub fn from_data_url(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_data_url(&self) -> &str {
        &self.0
    }

    /// MIME type declared by the data URL header.
    pub fn mime_type(&self) -> &str {
        self.header()
            .and_then(|header| header.strip_prefix("data:"))
            .and_then(|rest| rest.split(';').next())
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME)
    }

    /// Base64 body without the data URL header.
    pub fn base64_data(&self) -> &str {
        match self.0.split_once(',') {
            Some((_, data)) => data,
            None => &self.0,
        }
    }

    /// Approximate decoded size in bytes.
    pub fn decoded_len(&self) -> usize {
        self.base64_data().len() / 4 * 3
    }

    fn header(&self) -> Option<&str> {
        self.0.split_once(',').map(|(header, _)| header)
    }
}
