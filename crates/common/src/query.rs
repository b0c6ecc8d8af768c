//! Query type passed from the supervisor down to every tool.

use crate::{QuorumError, Result};
use serde::{Deserialize, Serialize};

/// A similarity query delegated through the agent hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Unique query ID, used to correlate log lines across agents
    pub id: String,

    /// Query embedding
    pub vector: Vec<f32>,

    /// Result limit override. `None` uses each tool's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
}

impl Query {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            id: format!("query_{}", uuid::Uuid::new_v4()),
            vector,
            top_k: None,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Dimension of the query vector.
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    /// Parse a comma-separated list of floats, e.g. `"1, 0.5, -2"`.
    pub fn parse_vector(input: &str) -> Result<Vec<f32>> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f32>().map_err(|e| {
                    QuorumError::InvalidInput(format!("'{}' is not a number: {}", s, e))
                })
            })
            .collect()
    }
}
