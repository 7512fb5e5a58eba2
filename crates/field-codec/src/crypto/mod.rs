//! Cryptographic primitives for field-level encryption.
//!
//! This module is intentionally free of registry and record-shape concerns.
//! It provides key derivation, the raw AEAD operations, and the stored
//! envelope format used by the codec layer.
//!
//! # Stored envelope format
//!
//! ```text
//! base64(salt[64] || iv[16] || tag[16] || ciphertext)
//! ```
//!
//! The envelope carries no version or algorithm tag. Rotating the master
//! secret therefore orphans all previously written ciphertext, with no way
//! to tell "wrong key" apart from "never encrypted" — a known gap kept for
//! wire compatibility with historical rows.

pub mod cipher;
pub mod envelope;
pub mod kdf;

pub use kdf::KEY_LEN;
