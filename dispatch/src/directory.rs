//! Collaborator interfaces for farm registration and credentials.
//!
//! Persistence of farm records and token refresh live outside this crate;
//! the dispatcher only reads through these traits, which are queried
//! concurrently but never written during a dispatch.

use crate::config::Config;
use crate::types::{FarmId, FarmRecord};
use async_trait::async_trait;
use farm_client::Credential;
use std::collections::HashMap;

/// Lookup of registered farms.
#[async_trait]
pub trait FarmDirectory: Send + Sync {
    /// Every registered farm, in directory order.
    async fn get_all(&self) -> Vec<FarmRecord>;

    /// Farms matching the given ids, each at most once, in directory order.
    /// Ids with no matching record are simply absent from the result.
    async fn get_by_ids(&self, ids: &[FarmId]) -> Vec<FarmRecord>;
}

/// Resolution of per-farm credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn resolve(&self, farm_id: FarmId) -> Option<Credential>;
}

/// Config-backed in-memory directory and credential store.
///
/// Stands in for the relational registry so the system runs end to end
/// without it.
pub struct StaticDirectory {
    farms: Vec<FarmRecord>,
    credentials: HashMap<FarmId, Credential>,
}

impl StaticDirectory {
    pub fn new(farms: Vec<FarmRecord>, credentials: HashMap<FarmId, Credential>) -> Self {
        StaticDirectory { farms, credentials }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut farms = Vec::with_capacity(config.farms.len());
        let mut credentials = HashMap::with_capacity(config.farms.len());
        for entry in &config.farms {
            farms.push(FarmRecord {
                id: entry.id,
                name: entry.name.clone(),
                url: entry.url.clone(),
                active: entry.active,
            });
            credentials.insert(entry.id, entry.auth.clone());
        }
        StaticDirectory { farms, credentials }
    }
}

#[async_trait]
impl FarmDirectory for StaticDirectory {
    async fn get_all(&self) -> Vec<FarmRecord> {
        self.farms.clone()
    }

    async fn get_by_ids(&self, ids: &[FarmId]) -> Vec<FarmRecord> {
        self.farms
            .iter()
            .filter(|farm| ids.contains(&farm.id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CredentialStore for StaticDirectory {
    async fn resolve(&self, farm_id: FarmId) -> Option<Credential> {
        self.credentials.get(&farm_id).cloned()
    }
}
