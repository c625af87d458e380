//! Line-delimited JSON files: one record object per line.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use cinemeta_core::Record;
use serde_json::Value;

use crate::error::StoreError;
use crate::store::RecordStore;

/// Filesystem-backed JSONL store.
///
/// Saves go to a sibling `*.tmp` file which is flushed and synced before
/// being renamed over the target, so a reader only ever sees the previous
/// snapshot or the new one.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlStore;

impl JsonlStore {
    pub fn new() -> Self {
        Self
    }
}

impl RecordStore for JsonlStore {
    fn load(&self, path: &Path) -> Result<Vec<Record>, StoreError> {
        let file = File::open(path)?;
        parse_lines(BufReader::new(file), path)
    }

    fn save(&self, records: &[Record], path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = temp_path(path);
        let result = write_records(records, &tmp)
            .and_then(|()| fs::rename(&tmp, path).map_err(StoreError::from));
        if let Err(e) = result {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                log::debug!("Could not remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e);
        }

        log::debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

/// Write one record per line to `path`, flushed and synced.
fn write_records(records: &[Record], path: &Path) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

/// Parse JSONL from any reader. `path` is only used in error messages.
///
/// Blank lines are skipped; line numbers in errors are 1-based and count
/// blank lines.
pub fn parse_lines<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Record>, StoreError> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line)
            .map_err(|e| StoreError::malformed(path, line_no, e.to_string()))?;
        match value {
            Value::Object(fields) => records.push(Record::from_fields(fields)),
            other => {
                return Err(StoreError::malformed(
                    path,
                    line_no,
                    format!("expected a JSON object, found {}", kind_name(&other)),
                ));
            }
        }
    }
    Ok(records)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
