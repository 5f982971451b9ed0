use crate::types::FarmId;
use farm_client::Credential;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("duplicate farm id: {0}")]
    DuplicateFarmId(FarmId),

    #[error("farm {0} has an empty name")]
    EmptyFarmName(FarmId),

    #[error("timeouts must be greater than zero")]
    ZeroTimeout,

    #[error("max_concurrency must be greater than zero")]
    ZeroConcurrency,
}

/// Aggregator configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Registered farm servers
    pub farms: Vec<FarmEntry>,
    /// Timeouts for remote calls and the overall dispatch
    #[serde(default)]
    pub timeouts: Timeouts,
    /// Upper bound on concurrently contacted farms
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Config {
    /// Validates the aggregator configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut ids = HashSet::new();
        for farm in &self.farms {
            if farm.name.is_empty() {
                return Err(ValidationError::EmptyFarmName(farm.id));
            }
            if !ids.insert(farm.id) {
                return Err(ValidationError::DuplicateFarmId(farm.id));
            }
        }

        if self.timeouts.http_timeout_secs == 0 || self.timeouts.dispatch_timeout_secs == 0 {
            return Err(ValidationError::ZeroTimeout);
        }

        if self.max_concurrency == 0 {
            return Err(ValidationError::ZeroConcurrency);
        }

        Ok(())
    }
}

/// One registered farm in the config file
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FarmEntry {
    pub id: FarmId,
    pub name: String,
    /// Base URL of the farm server
    ///
    /// Note: uses `url::Url` so invalid URLs are rejected during config
    /// deserialization.
    pub url: Url,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Credential used to authenticate against this farm
    pub auth: Credential,
}

/// Timeout configuration
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct Timeouts {
    /// Timeout for a single HTTP call against one farm
    pub http_timeout_secs: u64,
    /// Deadline for the whole fan-out; farms still pending afterwards are
    /// recorded as timed out
    pub dispatch_timeout_secs: u64,
}

impl Timeouts {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            http_timeout_secs: 30,
            dispatch_timeout_secs: 60,
        }
    }
}

fn default_active() -> bool {
    true
}

fn default_max_concurrency() -> usize {
    16
}
