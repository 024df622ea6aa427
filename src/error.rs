use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by CaptionBot operations.
#[derive(Error, Debug)]
pub enum CaptionBotError {
    /// The image file could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Network-level request failure with context.
    #[error("{context}: {source}")]
    Network {
        context: String,
        source: reqwest::Error,
    },

    /// The upload endpoint answered with something other than 200 OK.
    #[error("Upload failed: {status_text}")]
    Http { status: u16, status_text: String },

    /// The response body was not a JSON string literal.
    #[error("Invalid response (HTTP {status}) {body:?}: {source}")]
    Decode {
        status: u16,
        body: String,
        source: serde_json::Error,
    },

    /// Building the outbound JSON body failed.
    #[error("Failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The multipart builder rejected the sniffed content type.
    #[error("Invalid content type {content_type:?}: {source}")]
    InvalidContentType {
        content_type: String,
        source: reqwest::Error,
    },
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CaptionBotError>;
