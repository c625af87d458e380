use std::collections::HashMap;
use std::path::{Path, PathBuf};

use cinemeta_core::{Record, RecordSchema};

use crate::error::StoreError;

/// Where a run takes its starting collection from.
///
/// Decided once by the caller so the store itself never has to probe the
/// filesystem to find out whether it is resuming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartMode {
    /// No checkpoint yet: start from the original input.
    FreshStart,
    /// Continue from a checkpoint written by an earlier run.
    Resume(PathBuf),
}

impl StartMode {
    /// `Resume(checkpoint)` if the checkpoint file exists, else `FreshStart`.
    pub fn detect(checkpoint: &Path) -> Self {
        if checkpoint.is_file() {
            Self::Resume(checkpoint.to_path_buf())
        } else {
            Self::FreshStart
        }
    }

    pub fn is_resume(&self) -> bool {
        matches!(self, Self::Resume(_))
    }
}

/// Persistence for an ordered record collection.
///
/// `save` always writes the whole collection; a completed save fully
/// replaces whatever was at `path` before.
pub trait RecordStore {
    fn load(&self, path: &Path) -> Result<Vec<Record>, StoreError>;

    fn save(&self, records: &[Record], path: &Path) -> Result<(), StoreError>;

    /// Load the checkpoint when resuming, otherwise the primary input.
    fn load_or_resume(&self, primary: &Path, mode: &StartMode) -> Result<Vec<Record>, StoreError> {
        match mode {
            StartMode::FreshStart => {
                log::info!("Starting fresh from {}", primary.display());
                self.load(primary)
            }
            StartMode::Resume(checkpoint) => {
                log::info!("Resuming from checkpoint {}", checkpoint.display());
                self.load(checkpoint)
            }
        }
    }
}

impl<R: RecordStore + ?Sized> RecordStore for &R {
    fn load(&self, path: &Path) -> Result<Vec<Record>, StoreError> {
        (**self).load(path)
    }

    fn save(&self, records: &[Record], path: &Path) -> Result<(), StoreError> {
        (**self).save(records, path)
    }
}

/// Warn about records that share a key or have none. Returns the number of
/// duplicates.
///
/// Records are enriched by position, so neither case stops a run; they only
/// make the output harder to match against other datasets.
pub fn validate_keys(records: &[Record], schema: &RecordSchema) -> usize {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut missing = 0usize;
    let mut duplicates = 0usize;
    for (i, record) in records.iter().enumerate() {
        match record.record_key(schema) {
            Some(key) => {
                if let Some(first) = seen.get(&key) {
                    log::warn!(
                        "Duplicate '{}' {} at record {} (first seen at record {})",
                        schema.key_field,
                        key,
                        i + 1,
                        first + 1
                    );
                    duplicates += 1;
                } else {
                    seen.insert(key, i);
                }
            }
            None => missing += 1,
        }
    }
    if missing > 0 {
        log::warn!(
            "{} record(s) have no '{}' key",
            missing,
            schema.key_field
        );
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed(key: serde_json::Value) -> Record {
        Record::new().with_field("movie_id", key)
    }

    #[test]
    fn unique_keys_have_no_duplicates() {
        let records = vec![keyed(json!(1)), keyed(json!(2)), Record::new()];
        assert_eq!(validate_keys(&records, &RecordSchema::default()), 0);
    }

    #[test]
    fn duplicate_keys_are_counted_not_rejected() {
        let records = vec![
            keyed(json!(1)),
            keyed(json!(2)),
            keyed(json!(1)),
            keyed(json!("1")),
        ];
        assert_eq!(validate_keys(&records, &RecordSchema::default()), 2);
    }

    #[test]
    fn detect_without_checkpoint_is_fresh() {
        let mode = StartMode::detect(Path::new("/nonexistent/cinemeta/out.jsonl"));
        assert_eq!(mode, StartMode::FreshStart);
        assert!(!mode.is_resume());
    }
}
