//! Pluggable final-response aggregation.

use quorum_common::WorkerOutput;
use serde::{Deserialize, Serialize};

/// Turns the ordered worker outputs of a delegation into a final response.
///
/// Implementations must be deterministic and defined for zero workers.
pub trait Aggregator: Send + Sync {
    type Output: Send;

    fn aggregate(&self, results: Vec<WorkerOutput>) -> Self::Output;
}

/// Structured response wrapping every worker's output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalResponse {
    /// Worker outputs in registration order
    pub results: Vec<WorkerOutput>,
}

impl FinalResponse {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Output of the named worker.
    pub fn worker(&self, name: &str) -> Option<&WorkerOutput> {
        self.results.iter().find(|r| r.worker == name)
    }
}

/// Default aggregator: wraps the full list in a [`FinalResponse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredAggregator;

impl Aggregator for StructuredAggregator {
    type Output = FinalResponse;

    fn aggregate(&self, results: Vec<WorkerOutput>) -> FinalResponse {
        FinalResponse { results }
    }
}

/// Renders each worker's output on its own line.
#[derive(Debug, Clone)]
pub struct ConcatAggregator {
    separator: String,
}

impl ConcatAggregator {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl Default for ConcatAggregator {
    fn default() -> Self {
        Self::new("\n")
    }
}

impl Aggregator for ConcatAggregator {
    type Output = String;

    fn aggregate(&self, results: Vec<WorkerOutput>) -> String {
        results
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

/// Aggregator backed by a closure.
pub struct FnAggregator<F> {
    f: F,
}

/// Build an aggregator from a closure.
pub fn from_fn<F, O>(f: F) -> FnAggregator<F>
where
    F: Fn(Vec<WorkerOutput>) -> O + Send + Sync,
    O: Send,
{
    FnAggregator { f }
}

impl<F, O> Aggregator for FnAggregator<F>
where
    F: Fn(Vec<WorkerOutput>) -> O + Send + Sync,
    O: Send,
{
    type Output = O;

    fn aggregate(&self, results: Vec<WorkerOutput>) -> O {
        (self.f)(results)
    }
}
