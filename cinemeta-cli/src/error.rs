use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Source setup failed
    #[error("{0}")]
    Scrape(#[from] cinemeta_scraper::ScrapeError),

    /// Run aborted before completion
    #[error("{0}")]
    Enrich(#[from] cinemeta_lib::EnrichError),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
