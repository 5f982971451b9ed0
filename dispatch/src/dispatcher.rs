//! Concurrent fan-out of one operation across the selected farms.
//!
//! Each farm is an independent unit of work: resolve its credential, build
//! a client, authenticate, run the operation, record the outcome. Tasks are
//! spawned on a `JoinSet` under a concurrency bound; a collection deadline
//! guarantees the response is never held hostage by a slow farm. Dropping
//! the returned future aborts in-flight per-farm calls.

use crate::aggregate::{AggregateResponse, FailureReason, Outcome};
use crate::config::Timeouts;
use crate::directory::{CredentialStore, FarmDirectory};
use crate::errors::Result;
use crate::operation::Operation;
use crate::selector::{FarmSelector, Selection};
use crate::types::{FarmId, FarmRecord};
use farm_client::{ClientError, Credential, FarmClient};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::sleep;

pub struct Dispatcher<'a> {
    directory: &'a dyn FarmDirectory,
    credentials: &'a dyn CredentialStore,
    timeouts: Timeouts,
    max_concurrency: usize,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        directory: &'a dyn FarmDirectory,
        credentials: &'a dyn CredentialStore,
        timeouts: Timeouts,
        max_concurrency: usize,
    ) -> Self {
        Dispatcher {
            directory,
            credentials,
            timeouts,
            max_concurrency,
        }
    }

    /// Single entry point: resolve the selection, fan the operation out,
    /// fold outcomes. Only contract violations in the operation itself
    /// surface as errors; every per-farm failure lands in the response map.
    pub async fn dispatch(
        &self,
        farm_ids: Option<&[FarmId]>,
        operation: &Operation,
    ) -> Result<AggregateResponse> {
        operation.validate()?;
        let selection = FarmSelector::new(self.directory).resolve(farm_ids).await;
        tracing::debug!(
            operation = operation.name(),
            farms = selection.farms.len(),
            missing = selection.missing.len(),
            "dispatching"
        );
        Ok(self.run(selection, operation).await)
    }

    /// Fan out an already-resolved selection.
    ///
    /// The response key set is exactly the selection: contacted farms plus
    /// the missing and inactive ids seeded up front.
    pub async fn run(&self, selection: Selection, operation: &Operation) -> AggregateResponse {
        let mut response = AggregateResponse::new();
        for &id in &selection.missing {
            response.record(id, Outcome::Failure(FailureReason::NotFound));
        }
        for &id in &selection.inactive {
            response.record(id, Outcome::Failure(FailureReason::Inactive));
        }

        let mut join_set = JoinSet::new();
        let mut pending: HashSet<FarmId> = HashSet::new();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));

        // Spawn in selection order for deterministic logging.
        for farm in selection.farms {
            let Some(credential) = self.credentials.resolve(farm.id).await else {
                tracing::warn!(farm = farm.id, "no credentials registered");
                response.record(farm.id, Outcome::Failure(FailureReason::MissingCredentials));
                continue;
            };

            let farm_id = farm.id;
            pending.insert(farm_id);

            let operation = operation.clone();
            let semaphore = semaphore.clone();
            let http_timeout = self.timeouts.http_timeout();
            join_set.spawn(async move {
                // The semaphore lives as long as every task and is never
                // closed, so acquisition only fails after abort.
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = run_farm(farm, credential, operation, http_timeout).await;
                (farm_id, outcome)
            });
        }

        let deadline = sleep(self.timeouts.dispatch_timeout());
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => {
                    tracing::warn!(
                        remaining = join_set.len(),
                        "dispatch deadline reached, aborting remaining farm tasks"
                    );
                    join_set.abort_all();
                    break;
                }
                joined = join_set.join_next() => {
                    match joined {
                        Some(Ok((farm_id, outcome))) => {
                            pending.remove(&farm_id);
                            response.record(farm_id, outcome);
                        }
                        Some(Err(e)) => tracing::error!("farm task panicked: {e}"),
                        // No more tasks
                        None => break,
                    }
                }
            }
        }

        // Farms still pending at the deadline get a timeout entry rather
        // than silently disappearing from the response.
        for farm_id in pending {
            response.record(farm_id, Outcome::Failure(FailureReason::Timeout));
        }

        response
    }
}

/// One farm's slice of a dispatch: authenticate, then run the operation.
async fn run_farm(
    farm: FarmRecord,
    credential: Credential,
    operation: Operation,
    http_timeout: Duration,
) -> Outcome {
    let mut client = match FarmClient::new(farm.url.clone(), credential, http_timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(farm = farm.id, error = %e, "failed to construct farm client");
            return Outcome::Failure(FailureReason::RemoteCall(e.to_string()));
        }
    };

    // Auth gate: no collection call is ever made against a farm that did
    // not authenticate.
    if !client.authenticate().await {
        tracing::debug!(farm = farm.id, name = %farm.name, "authentication failed");
        return Outcome::Failure(FailureReason::AuthenticationFailed);
    }

    let result = match operation {
        Operation::Info => client.info().await.map(Outcome::Success),
        Operation::Get { kind, filters } => client
            .get_collection(kind, &filters)
            .await
            .map(Outcome::from_records),
        Operation::Create { kind, record } => {
            client.create_record(kind, &record).await.map(Outcome::Success)
        }
        Operation::Update { kind, record } => {
            client.update_record(kind, &record).await.map(Outcome::Success)
        }
        Operation::Delete { kind, id } => {
            client.delete_record(kind, id).await.map(|ack| match ack.body {
                Some(body) => Outcome::Success(body),
                None => Outcome::Empty,
            })
        }
    };

    match result {
        Ok(outcome) => outcome,
        Err(ClientError::Timeout(path)) => {
            tracing::debug!(farm = farm.id, path = %path, "remote call timed out");
            Outcome::Failure(FailureReason::Timeout)
        }
        Err(e) => {
            tracing::debug!(farm = farm.id, error = %e, "remote call failed");
            Outcome::Failure(FailureReason::RemoteCall(e.to_string()))
        }
    }
}
