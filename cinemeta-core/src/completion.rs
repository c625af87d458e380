//! Decides which records still need a trip to the external provider.
//!
//! The resume logic depends on this being exact: a run that disagrees with
//! the previous run about what counts as "enriched" will either re-fetch
//! finished records or skip unfinished ones.

use serde_json::Value;

use crate::fields;
use crate::record::Record;

/// Minimum number of meaningfully present metadata fields for a record to
/// count as enriched. Partial enrichment is accepted; this is a tunable
/// heuristic, not a data-model rule.
pub const DEFAULT_COMPLETENESS_THRESHOLD: usize = 3;

/// What a field needs to hold to count towards the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    /// [`is_meaningful`].
    #[default]
    Meaningful,
    /// [`is_meaningful`], and objects must have at least one entry.
    NonEmpty,
}

impl Presence {
    pub fn counts(self, value: &Value) -> bool {
        match (self, value) {
            (Self::NonEmpty, Value::Object(o)) => !o.is_empty(),
            _ => is_meaningful(value),
        }
    }
}

/// A fixed list of enrichable fields plus the number that must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPolicy {
    fields: &'static [&'static str],
    threshold: usize,
    presence: Presence,
}

impl CompletionPolicy {
    pub fn new(fields: &'static [&'static str], threshold: usize) -> Self {
        Self {
            fields,
            threshold,
            presence: Presence::Meaningful,
        }
    }

    /// Metadata API job: 3 of description, interests, release date,
    /// directors, cast, writers.
    pub fn metadata() -> Self {
        Self::new(fields::METADATA_FIELDS, DEFAULT_COMPLETENESS_THRESHOLD)
    }

    /// Poster scrape job: a non-empty poster map.
    pub fn posters() -> Self {
        Self::new(fields::POSTER_FIELDS, 1).with_presence(Presence::NonEmpty)
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    /// How many of the policy's fields are meaningfully present.
    pub fn meaningful_count(&self, record: &Record) -> usize {
        self.fields
            .iter()
            .filter(|f| record.get(f).is_some_and(|v| self.presence.counts(v)))
            .count()
    }

    pub fn needs_enrichment(&self, record: &Record) -> bool {
        self.meaningful_count(record) < self.threshold
    }
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self::metadata()
    }
}

/// Non-null, non-blank for strings and non-empty for arrays. Objects,
/// numbers and booleans always count, even `{}`.
pub fn is_meaningful(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) | Value::Bool(_) | Value::Number(_) => true,
    }
}

#[cfg(test)]
#[path = "tests/completion_tests.rs"]
mod tests;
