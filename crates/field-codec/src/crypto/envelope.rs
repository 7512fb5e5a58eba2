//! The stored ciphertext envelope: `base64(salt || iv || tag || ciphertext)`.
//!
//! Structural validity is decided by length alone. A decoded value shorter
//! than [`MIN_ENVELOPE_LEN`] bytes is not a malformed envelope — it is
//! legacy plaintext, written before encryption was introduced, and must
//! flow through untouched. Since 96 bytes encode to exactly 128 base64
//! characters, any stored value under 128 characters can be rejected
//! without decoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::cipher::{IV_LEN, TAG_LEN};
use super::kdf::SALT_LEN;

/// Minimum decoded length of a structurally valid envelope.
pub const MIN_ENVELOPE_LEN: usize = SALT_LEN + IV_LEN + TAG_LEN;

/// Minimum encoded length: base64 of [`MIN_ENVELOPE_LEN`] bytes.
pub const MIN_ENCODED_LEN: usize = MIN_ENVELOPE_LEN / 3 * 4;

/// Errors from envelope parsing.
///
/// Only values that are long enough to be an envelope can produce one of
/// these; shorter values are the legacy-plaintext case, not an error.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The stored value is not valid base64.
    #[error("stored value is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A parsed ciphertext envelope for one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Per-value PBKDF2 salt.
    pub salt: [u8; SALT_LEN],
    /// AES-GCM nonce.
    pub iv: [u8; IV_LEN],
    /// GCM authentication tag.
    pub tag: [u8; TAG_LEN],
    /// AEAD ciphertext of the UTF-8 plaintext.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encode this envelope to its stored text form.
    pub fn to_stored(&self) -> String {
        let mut raw = Vec::with_capacity(MIN_ENVELOPE_LEN + self.ciphertext.len());
        raw.extend_from_slice(&self.salt);
        raw.extend_from_slice(&self.iv);
        raw.extend_from_slice(&self.tag);
        raw.extend_from_slice(&self.ciphertext);
        STANDARD.encode(raw)
    }

    /// Parse a stored column value.
    ///
    /// Returns `Ok(None)` when the value is too short to be an envelope
    /// (legacy plaintext — callers pass it through silently).
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidBase64`] when a value of envelope
    /// length fails to decode. Callers treat this as a decrypt failure,
    /// not a legacy value.
    pub fn parse(stored: &str) -> Result<Option<Self>, EnvelopeError> {
        if stored.len() < MIN_ENCODED_LEN {
            return Ok(None);
        }

        let raw = STANDARD.decode(stored)?;
        // Padded base64 can decode to slightly less than the encoded
        // length suggests; re-check against the structural minimum.
        if raw.len() < MIN_ENVELOPE_LEN {
            return Ok(None);
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&raw[..SALT_LEN]);
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&raw[SALT_LEN..SALT_LEN + IV_LEN]);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&raw[SALT_LEN + IV_LEN..MIN_ENVELOPE_LEN]);

        Ok(Some(Self {
            salt,
            iv,
            tag,
            ciphertext: raw[MIN_ENVELOPE_LEN..].to_vec(),
        }))
    }
}
