//! The lenient codec surface consumed by entity read/write paths.
//!
//! Entities hand whole row maps to [`RecordCodec`]; it applies
//! [`FieldCodec`] to the columns its registry names and nothing else.
//! Neither layer ever raises on the common failure paths — see the
//! failure-policy notes on [`FieldCodec::encrypt`] and
//! [`FieldCodec::decrypt`].

pub mod field;
pub mod record;

pub use field::{DecryptError, DecryptOutcome, FieldCodec};
pub use record::RecordCodec;
