/// Errors that stop a job before any record is fetched.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Why a single record's fetch failed. Never fatal to a batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Title not found")]
    NotFound,

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Transient error: {0}")]
    Transient(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn transient(msg: impl Into<String>) -> Self {
        Self::Transient(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Short tag for logs and the run log.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::RateLimited => "rate limited",
            Self::Transient(_) => "transient",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Malformed(e.to_string())
        } else if e.is_timeout() {
            Self::Transient(format!("request timed out: {e}"))
        } else {
            Self::Transient(e.to_string())
        }
    }
}
