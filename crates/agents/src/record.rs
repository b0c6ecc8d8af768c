//! Payloads the agents append to shared memory.

use quorum_common::WorkerOutput;
use quorum_memory::MemoryStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Memory shared by a supervisor and its workers.
pub type SharedMemory = Arc<MemoryStore<MemoryRecord>>;

/// A value recorded in memory by an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemoryRecord {
    /// Merged tool output of one worker task
    Worker(WorkerOutput),
    /// Ordered worker outputs collected by a supervisor
    Aggregate { results: Vec<WorkerOutput> },
}

impl MemoryRecord {
    pub fn as_worker(&self) -> Option<&WorkerOutput> {
        match self {
            Self::Worker(output) => Some(output),
            Self::Aggregate { .. } => None,
        }
    }

    pub fn as_aggregate(&self) -> Option<&[WorkerOutput]> {
        match self {
            Self::Aggregate { results } => Some(results),
            Self::Worker(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accessors() {
        let worker = MemoryRecord::Worker(WorkerOutput::empty("w1"));
        let aggregate = MemoryRecord::Aggregate {
            results: vec![WorkerOutput::empty("w1")],
        };

        assert_eq!(worker.as_worker().unwrap().worker, "w1");
        assert!(worker.as_aggregate().is_none());
        assert_eq!(aggregate.as_aggregate().unwrap().len(), 1);
        assert!(aggregate.as_worker().is_none());
    }

    #[test]
    fn test_record_is_tagged() {
        let json = serde_json::to_value(MemoryRecord::Aggregate { results: vec![] }).unwrap();
        assert_eq!(json["kind"], "aggregate");

        let json = serde_json::to_value(MemoryRecord::Worker(WorkerOutput::empty("w"))).unwrap();
        assert_eq!(json["kind"], "worker");
        assert_eq!(json["worker"], "w");
    }
}
