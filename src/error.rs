use std::path::PathBuf;

/// Errors surfaced by metadata lookups and downloads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// The source refused to serve the video. Carries its `reason` field.
    #[error("video unavailable: {0}")]
    UnavailableVideo(String),

    #[error("unable to create file {}: {source}", .path.display())]
    SinkCreation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no encoding at index {index} ({available} available)")]
    NoSuchEncoding { index: usize, available: usize },

    /// The content stream failed mid-transfer.
    #[error("transfer interrupted: {0}")]
    Transfer(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn http_status(status: u16, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }

    /// Network or status-level failure of a fetch.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::HttpStatus { .. } | Self::Transfer(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
