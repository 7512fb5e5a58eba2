//! Per-value key derivation from the master secret.
//!
//! Every encrypt and decrypt operation derives its own AES key from the
//! process-wide master secret and the envelope's 64-byte salt. The
//! derivation is deliberately slow (PBKDF2 at 100k iterations by default)
//! so the master secret cannot be cheaply brute-forced from leaked
//! ciphertext. There is no key cache: N fields on a record cost N
//! independent derivations.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

/// Byte length of a derived AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the per-value PBKDF2 salt.
pub const SALT_LEN: usize = 64;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Derive a 256-bit AES key from the master secret and a per-value salt.
///
/// PBKDF2-HMAC-SHA512. Pure and deterministic: the same `(secret, salt,
/// iterations)` triple always yields the same key. PBKDF2 is total for
/// well-formed inputs, so there is no failure path.
pub fn derive_key(secret: &[u8], salt: &[u8; SALT_LEN], iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(secret, salt, iterations, &mut key);
    key
}
