use farm_client::{RecordPayload, ResourceKind};
use indexmap::IndexMap;
use thiserror::Error;

/// Contract violations in an operation, caught before any farm is contacted
#[derive(Error, Debug, PartialEq)]
pub enum OperationError {
    #[error("create requires a record name")]
    MissingName,

    #[error("update requires a record id")]
    MissingId,

    #[error("the info collection only supports the info operation")]
    InfoKind,
}

/// One remote operation, fanned out identically to every selected farm.
///
/// Filters and record payloads pass through to the farm protocol verbatim;
/// only the minimal required fields are checked here.
#[derive(Clone, Debug)]
pub enum Operation {
    /// Server metadata from each farm.
    Info,
    /// Filtered listing of one resource collection.
    Get {
        kind: ResourceKind,
        filters: IndexMap<String, String>,
    },
    /// Create a record on every selected farm.
    Create {
        kind: ResourceKind,
        record: RecordPayload,
    },
    /// Update a record; the payload carries the target id.
    Update {
        kind: ResourceKind,
        record: RecordPayload,
    },
    /// Delete by id. The id is sent to every selected farm regardless of
    /// which farm owns the record; each farm answers for itself.
    Delete { kind: ResourceKind, id: i64 },
}

impl Operation {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Info => "info",
            Operation::Get { .. } => "get",
            Operation::Create { .. } => "create",
            Operation::Update { .. } => "update",
            Operation::Delete { .. } => "delete",
        }
    }

    /// Validates the operation before dispatch.
    ///
    /// Violations here are caller errors and abort the dispatch as a whole,
    /// unlike per-farm failures which are recovered into outcomes.
    pub fn validate(&self) -> Result<(), OperationError> {
        match self {
            Operation::Info => Ok(()),
            Operation::Get { kind, .. } => {
                // Info listings go through Operation::Info
                if *kind == ResourceKind::Info {
                    return Err(OperationError::InfoKind);
                }
                Ok(())
            }
            Operation::Create { kind, record } => {
                if *kind == ResourceKind::Info {
                    return Err(OperationError::InfoKind);
                }
                if record.name.is_none() {
                    return Err(OperationError::MissingName);
                }
                Ok(())
            }
            Operation::Update { kind, record } => {
                if *kind == ResourceKind::Info {
                    return Err(OperationError::InfoKind);
                }
                if record.id.is_none() {
                    return Err(OperationError::MissingId);
                }
                Ok(())
            }
            Operation::Delete { kind, .. } => {
                if *kind == ResourceKind::Info {
                    return Err(OperationError::InfoKind);
                }
                Ok(())
            }
        }
    }
}
