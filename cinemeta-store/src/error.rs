use std::path::PathBuf;

/// Errors that can occur while loading or saving a record collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record at {}:{line}: {message}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn malformed(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// 1-based line number of a malformed record, if this is a parse failure.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { line, .. } => Some(*line),
            _ => None,
        }
    }
}
