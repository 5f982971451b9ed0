//! Fan-out dispatch across registered farm servers.
//!
//! One dispatch resolves a farm selection through the [`FarmDirectory`],
//! builds one authenticated client per farm, runs a single [`Operation`]
//! concurrently against every selected farm and folds the per-farm outcomes
//! into an [`AggregateResponse`] keyed by farm id. Individual farms failing
//! never abort the batch.

pub mod aggregate;
pub mod config;
pub mod directory;
pub mod dispatcher;
pub mod errors;
pub mod operation;
pub mod selector;
pub mod types;

pub use aggregate::{AggregateResponse, FailureReason, Outcome};
pub use config::{Config, Timeouts, ValidationError};
pub use directory::{CredentialStore, FarmDirectory, StaticDirectory};
pub use dispatcher::Dispatcher;
pub use errors::{DispatchError, Result};
pub use operation::{Operation, OperationError};
pub use selector::{FarmSelector, Selection};
pub use types::{FarmId, FarmRecord};
