//! Sealed envelope layout and its text encoding.
//!
//! ```text
//! +----------------+------------------+-------------------------------+
//! | u16 BE length  | wrapped key      | AES-GCM ciphertext + 16B tag  |
//! +----------------+------------------+-------------------------------+
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sealedsecret_types::{bug, Result, SealError};
use std::fmt;

/// Size of the wrapped-key length prefix.
pub const LENGTH_PREFIX_BYTES: usize = 2;

/// Size of the AES-GCM authentication tag appended to the payload.
pub const TAG_BYTES: usize = 16;

/// Borrowed view of a decoded envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    /// Session key wrapped with RSA-OAEP
    pub wrapped_key: &'a [u8],
    /// Symmetric ciphertext including the tag
    pub payload: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Concatenate the segments into the wire layout.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let Ok(len) = u16::try_from(self.wrapped_key.len()) else {
            bug!("wrapped key of {} bytes overflows the length prefix", self.wrapped_key.len());
        };

        let mut out = Vec::with_capacity(LENGTH_PREFIX_BYTES + self.wrapped_key.len() + self.payload.len());
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(self.wrapped_key);
        out.extend_from_slice(self.payload);
        Ok(out)
    }

    /// Split a decoded blob into its segments, validating the length prefix.
    pub fn parse(blob: &'a [u8]) -> Result<Self> {
        if blob.len() < LENGTH_PREFIX_BYTES {
            return Err(SealError::MalformedEnvelope(format!(
                "{} bytes is shorter than the length prefix",
                blob.len()
            )));
        }

        let (prefix, rest) = blob.split_at(LENGTH_PREFIX_BYTES);
        let wrapped_len = u16::from_be_bytes([prefix[0], prefix[1]]) as usize;

        if wrapped_len == 0 {
            return Err(SealError::MalformedEnvelope("wrapped key is empty".to_string()));
        }
        if rest.len() < wrapped_len + TAG_BYTES {
            return Err(SealError::MalformedEnvelope(format!(
                "wrapped key of {} bytes and tag do not fit in {} remaining bytes",
                wrapped_len,
                rest.len()
            )));
        }

        let (wrapped_key, payload) = rest.split_at(wrapped_len);
        Ok(Self { wrapped_key, payload })
    }
}

/// Base64 (standard, padded) text form of one sealed envelope.
///
/// This is the only output that leaves the sealing engine.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SealedValue(String);

impl SealedValue {
    /// Encode raw envelope bytes.
    pub fn from_bytes(blob: &[u8]) -> Self {
        Self(STANDARD.encode(blob))
    }

    /// Wrap text that is expected to hold an encoded envelope, validating it.
    pub fn parse(text: &str) -> Result<Self> {
        let value = Self(text.trim().to_string());
        let blob = value.decode()?;
        Envelope::parse(&blob)?;
        Ok(value)
    }

    /// Decode back to envelope bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.0)
            .map_err(|e| SealError::MalformedEnvelope(format!("invalid base64: {}", e)))
    }

    /// Encoded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the encoded text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SealedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SealedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SealedValue").field(&format_args!("{} chars", self.0.len())).finish()
    }
}
