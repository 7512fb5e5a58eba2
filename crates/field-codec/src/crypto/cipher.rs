//! AES-256-GCM seal/open over raw envelope parts.
//!
//! The stored format keeps the 16-byte authentication tag in its own slot
//! between the IV and the ciphertext, so this layer works with detached
//! tags rather than the tag-appended buffers most AEAD helpers return.
//!
//! The IV is 16 bytes (not GCM's usual 12) because that is what the wire
//! format carries; `AesGcm` is generic over the nonce size for exactly
//! this case.

use aes_gcm::{
    aead::{
        generic_array::{typenum::U16, GenericArray},
        rand_core::RngCore,
        KeyInit, OsRng,
    },
    aes::Aes256,
    AeadInPlace, AesGcm,
};
use thiserror::Error;

use super::kdf::KEY_LEN;

/// AES-256-GCM with a 16-byte nonce, matching the stored envelope layout.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Byte length of the envelope IV (GCM nonce).
pub const IV_LEN: usize = 16;

/// Byte length of the GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The derived key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// AEAD authentication failed — wrong key or tampered data.
    #[error("aead operation failed")]
    AeadFailure,
}

/// Fill a fixed-size buffer from the OS CSPRNG.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Encrypt `plaintext`, returning the ciphertext and detached tag.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`]
/// bytes. [`CipherError::AeadFailure`] should be unreachable with a valid
/// key and nonce.
pub fn seal(
    key: &[u8],
    iv: &[u8; IV_LEN],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; TAG_LEN]), CipherError> {
    let cipher = build_cipher(key)?;
    let nonce = GenericArray::from_slice(iv);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(nonce, b"", &mut buffer)
        .map_err(|_| CipherError::AeadFailure)?;

    Ok((buffer, tag.into()))
}

/// Decrypt `ciphertext`, verifying the detached tag.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`]
/// bytes. Returns [`CipherError::AeadFailure`] if authentication fails
/// (wrong key or tampered data).
pub fn open(
    key: &[u8],
    iv: &[u8; IV_LEN],
    tag: &[u8; TAG_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    let nonce = GenericArray::from_slice(iv);
    let tag = GenericArray::from_slice(tag);

    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(nonce, b"", &mut buffer, tag)
        .map_err(|_| CipherError::AeadFailure)?;

    Ok(buffer)
}

fn build_cipher(key: &[u8]) -> Result<Aes256Gcm16, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }
    Aes256Gcm16::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)
}
