use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields;
use crate::imdb_id::ImdbId;

/// Ordered field-name to value map. Insertion order is kept so an untouched
/// record serializes back to the same bytes it was read from.
pub type FieldMap = serde_json::Map<String, Value>;

/// Names of the identity fields in a record collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    /// Field holding the dataset-local record key.
    pub key_field: String,
    /// Field holding the identifier sent to the external provider.
    pub id_field: String,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            key_field: fields::MOVIE_ID.to_string(),
            id_field: fields::IMDB_ID.to_string(),
        }
    }
}

/// One catalog item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(FieldMap);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: FieldMap) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.0
    }

    pub fn into_fields(self) -> FieldMap {
        self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn with_field(mut self, field: impl Into<String>, value: Value) -> Self {
        self.insert(field, value);
        self
    }

    /// Right-biased shallow merge: every key in `update` overwrites the
    /// record's value, even when the new value is null or empty. Keys absent
    /// from `update` are untouched and nothing is ever removed.
    ///
    /// Returns the number of keys written.
    pub fn merge(&mut self, update: FieldMap) -> usize {
        let written = update.len();
        for (key, value) in update {
            self.0.insert(key, value);
        }
        written
    }

    /// The record key as a display string, if the key field holds a scalar.
    pub fn record_key(&self, schema: &RecordSchema) -> Option<String> {
        match self.0.get(&schema.key_field)? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    /// The provider identifier, if present and well-formed.
    pub fn external_id(&self, schema: &RecordSchema) -> Option<ImdbId> {
        self.0.get(&schema.id_field).and_then(ImdbId::from_value)
    }

    /// Human-readable name for progress output: the movie title when known,
    /// otherwise the record key.
    pub fn label(&self, schema: &RecordSchema) -> String {
        [fields::MOVIE_TITLE, fields::TITLE]
            .iter()
            .filter_map(|f| self.0.get(*f).and_then(Value::as_str))
            .find(|s| !s.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.record_key(schema).map(|k| format!("#{k}")))
            .unwrap_or_else(|| "<untitled>".to_string())
    }
}

impl From<FieldMap> for Record {
    fn from(fields: FieldMap) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
