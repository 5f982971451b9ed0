use thiserror::Error;

/// Result type alias for dispatch operations
pub type Result<T, E = DispatchError> = std::result::Result<T, E>;

/// Hard errors surfaced to the caller before any farm is contacted.
///
/// Per-farm failures never appear here; they are folded into the response
/// map as `Failure` outcomes.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("invalid operation: {0}")]
    InvalidOperation(#[from] crate::operation::OperationError),

    #[error("invalid configuration: {0}")]
    Configuration(#[from] crate::config::ValidationError),
}
