//! Selective encryption of registered fields on row-shaped JSON values.
//!
//! The record codec sits between the query layer and application code: row
//! maps come in, row maps go out, and only the columns the registry names
//! are rewritten. Everything else — numbers, nulls, unregistered columns,
//! the record's shape — passes through untouched. Fields are independent,
//! so processing order never affects the result.

use serde_json::Value;
use tracing::debug;

use super::field::FieldCodec;
use crate::config::CodecConfig;
use crate::registry::{Entity, FieldRegistry};

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Applies the field codec to registry-listed columns of records.
#[derive(Debug, Clone)]
pub struct RecordCodec {
    field: FieldCodec,
    registry: FieldRegistry,
}

impl RecordCodec {
    /// Build a record codec from configuration and an injected registry.
    pub fn new(cfg: &CodecConfig, registry: FieldRegistry) -> Self {
        Self {
            field: FieldCodec::new(cfg),
            registry,
        }
    }

    /// The underlying single-field codec, for callers that need the strict
    /// `try_*` surface.
    pub fn field_codec(&self) -> &FieldCodec {
        &self.field
    }

    /// Encrypt the registered columns of one record before an INSERT or
    /// UPDATE. Non-object input is returned unchanged.
    pub fn encrypt_record(&self, entity: Entity, record: &Value) -> Value {
        self.apply(entity, record, Direction::Encrypt)
    }

    /// Decrypt the registered columns of one record after a SELECT.
    /// Non-object input is returned unchanged.
    pub fn decrypt_record(&self, entity: Entity, record: &Value) -> Value {
        self.apply(entity, record, Direction::Decrypt)
    }

    /// Encrypt each record of a result set. Non-array input is returned
    /// unchanged.
    pub fn encrypt_records(&self, entity: Entity, records: &Value) -> Value {
        self.apply_all(entity, records, Direction::Encrypt)
    }

    /// Decrypt each record of a result set. Non-array input is returned
    /// unchanged.
    pub fn decrypt_records(&self, entity: Entity, records: &Value) -> Value {
        self.apply_all(entity, records, Direction::Decrypt)
    }

    fn apply(&self, entity: Entity, record: &Value, direction: Direction) -> Value {
        let map = match record.as_object() {
            Some(map) => map,
            None => return record.clone(),
        };

        let mut out = map.clone();
        for column in self.registry.fields(entity) {
            let current = match out.get(column) {
                // Only non-empty string values are codec targets; null and
                // numeric columns must survive byte-identical.
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                _ => continue,
            };
            let replaced = match direction {
                Direction::Encrypt => self.field.encrypt(&current),
                Direction::Decrypt => self.field.decrypt(&current),
            };
            out.insert(column.clone(), Value::String(replaced));
        }
        debug!(entity = %entity, columns = self.registry.fields(entity).len(), "record codec applied");
        Value::Object(out)
    }

    fn apply_all(&self, entity: Entity, records: &Value, direction: Direction) -> Value {
        let items = match records.as_array() {
            Some(items) => items,
            None => return records.clone(),
        };
        Value::Array(
            items
                .iter()
                .map(|record| self.apply(entity, record, direction))
                .collect(),
        )
    }
}
