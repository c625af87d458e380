use cinemeta_store::StoreError;
use thiserror::Error;

/// Errors that end a run. Per-record fetch failures never show up here.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl EnrichError {
    pub fn invalid_options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }
}
