//! In-memory store for pipeline tests and dry runs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use cinemeta_core::Record;

use crate::error::StoreError;
use crate::store::RecordStore;

/// Keeps "files" in a map and remembers every save, in order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<HashMap<PathBuf, Vec<Record>>>,
    saves: RefCell<Vec<(PathBuf, Vec<Record>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, records: Vec<Record>) -> Self {
        self.files.borrow_mut().insert(path.into(), records);
        self
    }

    /// Current contents of `path`, if anything has been written there.
    pub fn contents(&self, path: &Path) -> Option<Vec<Record>> {
        self.files.borrow().get(path).cloned()
    }

    /// Every save so far as `(path, snapshot)`, oldest first.
    pub fn saves(&self) -> Vec<(PathBuf, Vec<Record>)> {
        self.saves.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.borrow().len()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, path: &Path) -> Result<Vec<Record>, StoreError> {
        self.contents(path).ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }

    fn save(&self, records: &[Record], path: &Path) -> Result<(), StoreError> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), records.to_vec());
        self.saves
            .borrow_mut()
            .push((path.to_path_buf(), records.to_vec()));
        Ok(())
    }
}
