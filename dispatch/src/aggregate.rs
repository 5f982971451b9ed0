//! Per-farm outcomes and their fold into one response map.
//!
//! The response is keyed by farm id, ordered by id. The key-set invariant:
//! every farm in the resolved selection produces exactly one entry, whether
//! its slice of the dispatch succeeded, returned nothing, or failed.

use crate::types::FarmId;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why one farm's slice of a dispatch failed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FailureReason {
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("timeout")]
    Timeout,

    #[error("farm not found")]
    NotFound,

    #[error("farm is not active")]
    Inactive,

    #[error("no credentials registered")]
    MissingCredentials,

    #[error("remote call failed: {0}")]
    RemoteCall(String),
}

impl Serialize for FailureReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result recorded for one farm within one dispatch.
///
/// `Success` wraps a (possibly empty) array for get-style operations and the
/// single echoed record for create/update; an empty listing is a success,
/// not a failure. `Empty` marks operations that intrinsically return
/// nothing, such as a delete acknowledged without a body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    Success(JsonValue),
    Empty,
    Failure(FailureReason),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Outcome of a listing: always a success, even with zero records.
    pub fn from_records(records: Vec<JsonValue>) -> Self {
        Outcome::Success(JsonValue::Array(records))
    }
}

/// Per-farm outcome map for one dispatch, ordered by farm id.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregateResponse {
    outcomes: BTreeMap<FarmId, Outcome>,
}

impl AggregateResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one farm. Each farm gets exactly one entry.
    pub fn record(&mut self, farm_id: FarmId, outcome: Outcome) {
        let replaced = self.outcomes.insert(farm_id, outcome);
        debug_assert!(replaced.is_none(), "duplicate outcome for farm {farm_id}");
    }

    pub fn get(&self, farm_id: FarmId) -> Option<&Outcome> {
        self.outcomes.get(&farm_id)
    }

    pub fn farm_ids(&self) -> impl Iterator<Item = FarmId> + '_ {
        self.outcomes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<FarmId, Outcome> {
        self.outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes_are_ordered_by_farm_id() {
        let mut response = AggregateResponse::new();
        response.record(3, Outcome::Empty);
        response.record(1, Outcome::from_records(vec![]));
        response.record(2, Outcome::Failure(FailureReason::Timeout));

        let ids: Vec<FarmId> = response.farm_ids().collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_listing_is_success_not_failure() {
        let outcome = Outcome::from_records(vec![]);
        assert!(outcome.is_success());
        assert_ne!(outcome, Outcome::Empty);
        assert_eq!(outcome, Outcome::Success(serde_json::json!([])));
    }

    #[test]
    fn test_serialized_shape() {
        let mut response = AggregateResponse::new();
        response.record(1, Outcome::Success(serde_json::json!([{"id": 7}])));
        response.record(2, Outcome::Failure(FailureReason::AuthenticationFailed));
        response.record(3, Outcome::Empty);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "1": {"outcome": "success", "value": [{"id": 7}]},
                "2": {"outcome": "failure", "value": "authentication failed"},
                "3": {"outcome": "empty"},
            })
        );
    }

    #[test]
    fn test_failure_reason_strings() {
        assert_eq!(
            FailureReason::AuthenticationFailed.to_string(),
            "authentication failed"
        );
        assert_eq!(FailureReason::Timeout.to_string(), "timeout");
        assert_eq!(FailureReason::NotFound.to_string(), "farm not found");
        assert_eq!(
            FailureReason::RemoteCall("HTTP 500".to_string()).to_string(),
            "remote call failed: HTTP 500"
        );
    }
}
