//! HTTP client for a single remote farm server.
//!
//! One [`FarmClient`] is built per farm per dispatch, from the farm's base
//! URL and its credential. It authenticates once, then performs typed
//! operations against the farm's resource collections. Payloads and filters
//! are passed through to the remote protocol opaquely.

pub mod client;
pub mod credentials;
pub mod errors;
pub mod protocol;

pub use client::{FarmClient, SessionState};
pub use credentials::Credential;
pub use errors::{ClientError, Result};
pub use protocol::{CollectionResponse, DeleteAck, RecordPayload, ResourceKind};
