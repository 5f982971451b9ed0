use thiserror::Error;

/// Result type alias for farm client operations
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Errors that can occur while talking to one farm server
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned {status} for {path}")]
    RemoteStatus {
        status: reqwest::StatusCode,
        path: String,
    },

    #[error("request timed out for {0}")]
    Timeout(String),

    #[error("failed to parse remote response: {0}")]
    ResponseParse(String),

    #[error("cannot build endpoint URL from {base} and {path}")]
    InvalidEndpoint { base: String, path: String },

    #[error("update record is missing an id")]
    MissingRecordId,
}
