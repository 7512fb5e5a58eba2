//! Transparent field-level encryption for psychiatry EMR database columns.
//!
//! Sensitive text columns on four entity types (patient, clinical
//! proforma, ADL file, prescription) are encrypted before INSERT/UPDATE
//! and decrypted after SELECT. Each value is stored as a self-contained
//! envelope, `base64(salt || iv || tag || ciphertext)`, with a fresh salt
//! and IV per write and a per-value key derived from one process-wide
//! master secret.
//!
//! Values written before encryption was introduced are shorter than the
//! envelope minimum and pass through both directions untouched, so the
//! codec can be deployed against a live database without a rewrite
//! migration. (Columns must already be widened to TEXT; even a one-byte
//! plaintext stores as 128+ base64 characters.)
//!
//! The public surface never raises: encrypt failures fall back to storing
//! plaintext, decrypt failures fall back to returning the stored value.
//! Callers that need to observe failures use
//! [`codec::FieldCodec::try_decrypt`], and the companion `cipher-detect`
//! crate gives consumers a heuristic for spotting values that are still
//! ciphertext after a silent decrypt failure.
//!
//! ```no_run
//! use field_codec::{CodecConfig, Entity, FieldRegistry, RecordCodec};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = CodecConfig::from_env()?;
//! let codec = RecordCodec::new(&cfg, FieldRegistry::standard());
//!
//! let row = codec.encrypt_record(Entity::Patient, &json!({
//!     "name": "Ravi Kumar",
//!     "age": 42,
//! }));
//! // row["name"] is now an envelope; row["age"] is still the number 42.
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod registry;

pub use codec::{DecryptError, DecryptOutcome, FieldCodec, RecordCodec};
pub use config::{CodecConfig, MasterSecret};
pub use registry::{Entity, FieldRegistry};
