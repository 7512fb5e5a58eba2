//! Consumer-side detection of values that still look like ciphertext.
//!
//! The backend codec never raises on decrypt failure: a corrupted or
//! wrong-key envelope is returned as-is, so the API can hand a consumer a
//! field that is still raw base64. This crate is the presentation side's
//! safety net — it flags such values so operators see a labelled degraded
//! state instead of ciphertext leaking silently into the UI.
//!
//! The check is a heuristic, not a proof: a long base64-looking plaintext
//! is a false positive, a short secret a false negative. It exists because
//! the envelope carries no explicit "this is ciphertext" marker; explicit
//! tagging would be the structurally sound fix.
//!
//! This crate models the frontend and must stay free of crypto
//! dependencies — it only ever sees serialised JSON values.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Minimum length at which a value is eligible for suspicion. A valid
/// envelope encodes to at least this many base64 characters.
pub const MIN_SUSPECT_LEN: usize = 128;

/// Label shown in place of a field that appears to be undecrypted.
pub const DECRYPTION_FAILED_PLACEHOLDER: &str = "[Encrypted — Decryption Failed]";

/// Characters of preview kept when flagging a suspect value.
const PREVIEW_LEN: usize = 24;

/// Heuristic: does `value` still look like a stored ciphertext envelope?
///
/// True iff the value is at least [`MIN_SUSPECT_LEN`] characters, every
/// character is in the standard base64 alphabet, and it contains no
/// whitespace. Real prose fails on spaces and punctuation almost
/// immediately; envelopes always pass.
pub fn looks_encrypted(value: &str) -> bool {
    value.len() >= MIN_SUSPECT_LEN
        && !value.contains(char::is_whitespace)
        && value.chars().all(is_base64_char)
}

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='
}

/// How a field value should be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FieldDisplay {
    /// Render the value as-is.
    Plain { value: String },
    /// Render [`DECRYPTION_FAILED_PLACEHOLDER`]; the value appears to be
    /// an envelope the backend failed to decrypt.
    SuspectCiphertext { preview: String },
}

/// Classify one field value for display, logging a diagnostic when the
/// value is flagged.
pub fn classify(field: &str, value: &str) -> FieldDisplay {
    if looks_encrypted(value) {
        let preview = preview_of(value);
        warn!(field = %field, preview = %preview, "field value looks like undecrypted ciphertext");
        FieldDisplay::SuspectCiphertext { preview }
    } else {
        FieldDisplay::Plain {
            value: value.to_owned(),
        }
    }
}

/// A flagged field on a scanned record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspectField {
    /// Column name.
    pub field: String,
    /// Truncated preview of the suspect value.
    pub preview: String,
}

/// Scan the named fields of a record and return every one that looks like
/// undecrypted ciphertext. Missing and non-string fields are skipped;
/// non-object input yields no findings.
pub fn scan_record(record: &Value, fields: &[&str]) -> Vec<SuspectField> {
    let map = match record.as_object() {
        Some(map) => map,
        None => return Vec::new(),
    };

    fields
        .iter()
        .filter_map(|&field| match map.get(field) {
            Some(Value::String(s)) if looks_encrypted(s) => {
                let preview = preview_of(s);
                warn!(field = %field, preview = %preview, "field value looks like undecrypted ciphertext");
                Some(SuspectField {
                    field: field.to_owned(),
                    preview,
                })
            }
            _ => None,
        })
        .collect()
}

fn preview_of(value: &str) -> String {
    let truncated: String = value.chars().take(PREVIEW_LEN).collect();
    format!("{truncated}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base64_blob(len: usize) -> String {
        "QWJjZGVm".repeat(len / 8 + 1)[..len].to_owned()
    }

    #[test]
    fn long_pure_base64_is_flagged() {
        assert!(looks_encrypted(&base64_blob(200)));
    }

    #[test]
    fn prose_is_not_flagged() {
        assert!(!looks_encrypted("Major Depressive Disorder"));
    }

    #[test]
    fn whitespace_disqualifies_even_long_values() {
        let mut long = base64_blob(200);
        long.insert(100, ' ');
        assert!(!looks_encrypted(&long));
    }

    #[test]
    fn short_base64_is_not_flagged() {
        assert!(!looks_encrypted(&base64_blob(127)));
        assert!(looks_encrypted(&base64_blob(128)));
    }

    #[test]
    fn non_base64_characters_disqualify() {
        let mut long = base64_blob(200);
        long.insert(50, '#');
        assert!(!looks_encrypted(&long));
    }

    #[test]
    fn classify_plain() {
        let display = classify("diagnosis", "Major Depressive Disorder");
        assert_eq!(
            display,
            FieldDisplay::Plain {
                value: "Major Depressive Disorder".into()
            }
        );
    }

    #[test]
    fn classify_suspect_truncates_preview() {
        let blob = base64_blob(200);
        match classify("name", &blob) {
            FieldDisplay::SuspectCiphertext { preview } => {
                assert!(preview.chars().count() <= PREVIEW_LEN + 1);
                assert!(preview.ends_with('…'));
            }
            other => panic!("expected suspect, got {other:?}"),
        }
    }

    #[test]
    fn scan_record_flags_only_suspect_fields() {
        let record = json!({
            "name": base64_blob(160),
            "diagnosis": "Recurrent depressive disorder",
            "age": 42
        });
        let suspects = scan_record(&record, &["name", "diagnosis", "age", "missing"]);
        assert_eq!(suspects.len(), 1);
        assert_eq!(suspects[0].field, "name");
    }

    #[test]
    fn scan_non_object_yields_nothing() {
        assert!(scan_record(&json!([1, 2, 3]), &["name"]).is_empty());
    }

    #[test]
    fn field_display_serialises_with_state_tag() {
        let display = classify("name", &base64_blob(160));
        let rendered = serde_json::to_value(&display).unwrap();
        assert_eq!(rendered["state"], "suspect_ciphertext");
    }
}
