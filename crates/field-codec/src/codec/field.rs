//! Encryption and decryption of one scalar column value.
//!
//! The public `encrypt`/`decrypt` pair never raises: a write must succeed
//! even if encryption fails, and one corrupt historical row must not break
//! an entire list fetch. Both degrade to returning their input unchanged
//! and leave a log entry behind. The `try_*` pair underneath exposes the
//! structured result for callers that want to observe failures.

use thiserror::Error;
use tracing::{error, warn};

use crate::config::{CodecConfig, MasterSecret};
use crate::crypto::cipher::{self, CipherError, IV_LEN};
use crate::crypto::envelope::{Envelope, EnvelopeError};
use crate::crypto::kdf::{self, SALT_LEN};

/// Why a decrypt attempt failed on a value that looked like an envelope.
#[derive(Debug, Error)]
pub enum DecryptError {
    /// The stored value could not be base64-decoded.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// Tag verification failed — wrong key or tampered data.
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// The plaintext recovered from the envelope is not valid UTF-8.
    #[error("decrypted bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Structured result of a decrypt attempt.
#[derive(Debug)]
pub enum DecryptOutcome {
    /// Empty input or legacy plaintext; the stored value is already the
    /// plaintext and flows through unchanged.
    PassThrough,
    /// The stored value was a valid envelope and decrypted cleanly.
    Decrypted(String),
    /// The stored value looked like an envelope but could not be
    /// decrypted. The lenient surface returns the stored value as-is.
    Failed(DecryptError),
}

/// Encrypts and decrypts single field values against the master secret.
///
/// Stateless apart from configuration; cheap to clone and safe to share
/// across threads. Every operation derives its own key, so there is no
/// cached key material to coordinate.
#[derive(Debug, Clone)]
pub struct FieldCodec {
    secret: MasterSecret,
    iterations: u32,
}

impl FieldCodec {
    /// Build a codec from validated configuration.
    pub fn new(cfg: &CodecConfig) -> Self {
        Self {
            secret: cfg.master_secret.clone(),
            iterations: cfg.kdf_iterations,
        }
    }

    /// Encrypt one field value, never raising.
    ///
    /// Empty input passes through: absent data must never become spurious
    /// ciphertext. On any internal failure the plaintext is returned
    /// unchanged and an error is logged — availability over
    /// confidentiality, because the write has to succeed either way.
    pub fn encrypt(&self, plaintext: &str) -> String {
        match self.try_encrypt(plaintext) {
            Ok(stored) => stored,
            Err(e) => {
                error!(error = %e, "field encryption failed; storing plaintext");
                plaintext.to_owned()
            }
        }
    }

    /// Decrypt one stored value, never raising.
    ///
    /// Legacy plaintext (anything below the structural envelope minimum)
    /// passes through silently. A value of envelope length that fails to
    /// decode or verify is logged at warning level and returned unchanged,
    /// which makes it indistinguishable from legacy data to the caller.
    pub fn decrypt(&self, stored: &str) -> String {
        match self.try_decrypt(stored) {
            DecryptOutcome::Decrypted(plaintext) => plaintext,
            DecryptOutcome::PassThrough => stored.to_owned(),
            DecryptOutcome::Failed(e) => {
                warn!(error = %e, "field decryption failed; returning stored value");
                stored.to_owned()
            }
        }
    }

    /// Strict encrypt: fresh salt and IV, derive key, seal, encode.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError`] if the AEAD layer rejects the operation.
    pub fn try_encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        let salt: [u8; SALT_LEN] = cipher::random_bytes();
        let iv: [u8; IV_LEN] = cipher::random_bytes();
        let key = kdf::derive_key(self.secret.as_bytes(), &salt, self.iterations);

        let (ciphertext, tag) = cipher::seal(&key, &iv, plaintext.as_bytes())?;

        let envelope = Envelope {
            salt,
            iv,
            tag,
            ciphertext,
        };
        Ok(envelope.to_stored())
    }

    /// Strict decrypt with a structured outcome.
    pub fn try_decrypt(&self, stored: &str) -> DecryptOutcome {
        if stored.is_empty() {
            return DecryptOutcome::PassThrough;
        }

        let envelope = match Envelope::parse(stored) {
            Ok(Some(envelope)) => envelope,
            Ok(None) => return DecryptOutcome::PassThrough,
            Err(e) => return DecryptOutcome::Failed(e.into()),
        };

        let key = kdf::derive_key(self.secret.as_bytes(), &envelope.salt, self.iterations);
        let plaintext = match cipher::open(&key, &envelope.iv, &envelope.tag, &envelope.ciphertext)
        {
            Ok(bytes) => bytes,
            Err(e) => return DecryptOutcome::Failed(e.into()),
        };

        match String::from_utf8(plaintext) {
            Ok(text) => DecryptOutcome::Decrypted(text),
            Err(_) => DecryptOutcome::Failed(DecryptError::InvalidUtf8),
        }
    }
}
