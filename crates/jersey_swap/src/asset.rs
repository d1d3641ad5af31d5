//! Image assets and the data URI codec.
//!
//! Every image that moves through a session (uploads and generated results)
//! is a self-describing `data:<mime>;base64,<payload>` string. The codec
//! splits such a string into its MIME type and base64 payload and builds it
//! back again.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SwapError};

/// MIME type assumed when the data URI header carries none.
pub const FALLBACK_MIME_TYPE: &str = "image/jpeg";

/// A data URI split into its MIME type and base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataUriParts {
    pub mime_type: String,
    pub payload: String,
}

/// Parse a data URI into its MIME type and base64 payload.
///
/// The string is split on the first comma. The header must start with
/// `data:`; the MIME type is whatever sits between `data:` and the first `;`.
/// A header without a `;`, or with an empty MIME type, falls back to
/// [`FALLBACK_MIME_TYPE`].
pub fn parse(uri: &str) -> Result<DataUriParts> {
    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| SwapError::MalformedInput("missing ',' separator".to_string()))?;

    let media = header
        .strip_prefix("data:")
        .ok_or_else(|| SwapError::MalformedInput("missing 'data:' prefix".to_string()))?;

    if payload.is_empty() {
        return Err(SwapError::MalformedInput("empty payload".to_string()));
    }

    let mime_type = match media.split_once(';') {
        Some((mime, _)) if !mime.is_empty() => mime,
        _ => FALLBACK_MIME_TYPE,
    };

    Ok(DataUriParts {
        mime_type: mime_type.to_string(),
        payload: payload.to_string(),
    })
}

/// Build a base64 data URI. Inputs are trusted.
pub fn encode(mime_type: &str, payload: &str) -> String {
    format!("data:{};base64,{}", mime_type, payload)
}

/// An image held as a data URI.
///
/// Assets are never mutated; a new upload or result replaces the old value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageAsset(String);

impl ImageAsset {
    /// Wrap a data URI produced by an input adapter. Validation is deferred to
    /// request construction, where a malformed URI aborts the operation.
    pub fn from_data_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn from_parts(mime_type: &str, payload: &str) -> Self {
        Self(encode(mime_type, payload))
    }

    /// Encode raw image bytes.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self::from_parts(mime_type, &STANDARD.encode(bytes))
    }

    pub fn as_data_uri(&self) -> &str {
        &self.0
    }

    pub fn parts(&self) -> Result<DataUriParts> {
        parse(&self.0)
    }

    pub fn mime_type(&self) -> Result<String> {
        Ok(self.parts()?.mime_type)
    }

    /// Decode the payload into raw image bytes, e.g. for writing to disk.
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        let parts = self.parts()?;
        STANDARD
            .decode(parts.payload.as_bytes())
            .map_err(|e| SwapError::MalformedInput(format!("invalid base64 payload: {}", e)))
    }
}

impl From<DataUriParts> for ImageAsset {
    fn from(parts: DataUriParts) -> Self {
        Self::from_parts(&parts.mime_type, &parts.payload)
    }
}

impl fmt::Display for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
