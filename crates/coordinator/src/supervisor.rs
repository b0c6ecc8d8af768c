//! Supervisor agent - delegates a query to every worker and aggregates results.

use crate::aggregate::{Aggregator, StructuredAggregator};
use async_trait::async_trait;
use quorum_agents::{Agent, AgentCore, MemoryRecord, SharedMemory, WorkerAgent};
use quorum_common::{Query, QuorumError, Result, WorkerOutput};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument};

/// How workers are invoked during a delegation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One worker at a time, in registration order
    #[default]
    Sequential,
    /// All workers spawned at once on the tokio runtime
    Concurrent,
}

/// Agent that owns a set of workers and fans each query out to all of them.
///
/// Worker outputs are always collected in registration order, whichever
/// execution mode is used. The first worker failure aborts the delegation:
/// no aggregate is recorded and the error names the failing worker.
pub struct SupervisorAgent<A = StructuredAggregator> {
    core: AgentCore,
    workers: Vec<Arc<WorkerAgent>>,
    mode: ExecutionMode,
    aggregator: A,
}

impl SupervisorAgent<StructuredAggregator> {
    pub fn new(name: impl Into<String>, memory: SharedMemory) -> Self {
        Self {
            core: AgentCore::new(name, memory),
            workers: Vec::new(),
            mode: ExecutionMode::default(),
            aggregator: StructuredAggregator,
        }
    }
}

impl<A: Aggregator> SupervisorAgent<A> {
    /// Register a worker. Workers run and report in registration order.
    pub fn with_worker(mut self, worker: WorkerAgent) -> Self {
        self.workers.push(Arc::new(worker));
        self
    }

    pub fn with_workers(mut self, workers: impl IntoIterator<Item = WorkerAgent>) -> Self {
        self.workers.extend(workers.into_iter().map(Arc::new));
        self
    }

    pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the final-response aggregator.
    pub fn with_aggregator<B: Aggregator>(self, aggregator: B) -> SupervisorAgent<B> {
        SupervisorAgent {
            core: self.core,
            workers: self.workers,
            mode: self.mode,
            aggregator,
        }
    }

    pub fn workers(&self) -> &[Arc<WorkerAgent>] {
        &self.workers
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Delegate `query` to every worker, record the ordered results and
    /// return the aggregated response.
    #[instrument(skip(self, query), fields(agent = %self.core.name(), query_id = %query.id))]
    pub async fn delegate_task(&self, query: &Query) -> Result<A::Output> {
        let start = Instant::now();

        info!(
            workers = self.workers.len(),
            mode = ?self.mode,
            "Delegating task"
        );

        let results = match self.mode {
            ExecutionMode::Sequential => self.run_sequential(query).await,
            ExecutionMode::Concurrent => self.run_concurrent(query).await,
        }
        .map_err(|e| {
            error!(error = %e, "Delegation failed");
            e
        })?;

        self.core
            .memory()
            .store(
                self.core.name(),
                MemoryRecord::Aggregate {
                    results: results.clone(),
                },
            )
            .await;

        info!(
            workers = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Delegation completed"
        );

        Ok(self.generate_final_response(results))
    }

    /// Build the final response from ordered worker outputs.
    pub fn generate_final_response(&self, results: Vec<WorkerOutput>) -> A::Output {
        self.aggregator.aggregate(results)
    }

    async fn run_sequential(&self, query: &Query) -> Result<Vec<WorkerOutput>> {
        let mut results = Vec::with_capacity(self.workers.len());

        for (i, worker) in self.workers.iter().enumerate() {
            debug!(step = i + 1, worker = %worker.name(), "Running worker");

            let output = worker
                .process_task(query)
                .await
                .map_err(|e| e.in_worker(worker.name()))?;
            results.push(output);
        }

        Ok(results)
    }

    async fn run_concurrent(&self, query: &Query) -> Result<Vec<WorkerOutput>> {
        let query = Arc::new(query.clone());
        let mut set = JoinSet::new();
        // A panicked task only reports its id, so keep the way back to its slot
        let mut slot_of = HashMap::with_capacity(self.workers.len());

        for (index, worker) in self.workers.iter().enumerate() {
            let worker = worker.clone();
            let query = query.clone();
            let handle = set.spawn(async move { (index, worker.process_task(&query).await) });
            slot_of.insert(handle.id(), index);
        }

        // Slots are indexed by registration order, not completion order
        let mut slots: Vec<Option<WorkerOutput>> = vec![None; self.workers.len()];

        while let Some(joined) = set.join_next().await {
            let (index, result) = match joined {
                Ok(joined) => joined,
                Err(e) => {
                    set.abort_all();
                    let err = QuorumError::Join(e.to_string());
                    return Err(match slot_of.get(&e.id()) {
                        Some(&index) => err.in_worker(self.workers[index].name()),
                        None => err,
                    });
                }
            };
            match result {
                Ok(output) => {
                    debug!(worker = %self.workers[index].name(), "Worker finished");
                    slots[index] = Some(output);
                }
                Err(e) => {
                    set.abort_all();
                    return Err(e.in_worker(self.workers[index].name()));
                }
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    QuorumError::Join(format!(
                        "worker '{}' produced no result",
                        self.workers[index].name()
                    ))
                })
            })
            .collect()
    }
}

#[async_trait]
impl<A: Aggregator> Agent for SupervisorAgent<A> {
    type Output = A::Output;

    fn core(&self) -> &AgentCore {
        &self.core
    }

    async fn handle(&self, query: &Query) -> Result<A::Output> {
        self.delegate_task(query).await
    }
}
