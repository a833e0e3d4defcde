// Error types for the fetcher and the page loader

use thiserror::Error;

/// Everything that can stop a fetcher run
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Missing env var: {0}")]
    MissingEnv(&'static str),

    #[error("HTTP {status} transient: {body}")]
    Transient { status: u16, body: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid JSON from YouTube API: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("No videoId returned from YouTube API.")]
    MissingVideoId,

    #[error("YouTube API returned a malformed videoId: {0:?}")]
    InvalidVideoId(String),

    #[error("failed to write record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl FetchError {
    /// Transient statuses and transport failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transient { .. } | FetchError::Network(_))
    }
}

/// Reasons the page loader keeps the fallback embed
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Fetch failed: {url} (HTTP {status})")]
    Status { url: String, status: u16 },

    #[error("invalid JSON in latest.json: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("failed to read latest.json: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid videoId in latest.json")]
    InvalidVideoId,
}
