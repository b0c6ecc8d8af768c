//! Corpus types for the retrieval tool.

use serde::{Deserialize, Serialize};

/// Default number of matches returned by a retrieval query.
pub const DEFAULT_TOP_K: usize = 3;

/// A reference embedding and the label of the document it represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// Document label
    pub label: String,

    /// Reference embedding
    pub vector: Vec<f32>,
}

impl CorpusEntry {
    pub fn new(label: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            label: label.into(),
            vector,
        }
    }
}
