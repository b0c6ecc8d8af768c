//! Error types for Quorum.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuorumError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Tool '{tool}' failed: {message}")]
    Tool { tool: String, message: String },

    #[error("Tool '{tool}' timed out after {timeout_ms}ms")]
    ToolTimeout { tool: String, timeout_ms: u64 },

    #[error("Worker '{worker}' failed: {source}")]
    Worker {
        worker: String,
        #[source]
        source: Box<QuorumError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task join error: {0}")]
    Join(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QuorumError {
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Wrap an error as a failure of the named worker.
    pub fn in_worker(self, worker: impl Into<String>) -> Self {
        Self::Worker {
            worker: worker.into(),
            source: Box::new(self),
        }
    }

    /// Name of the worker a delegation failure came from, if any.
    pub fn failing_worker(&self) -> Option<&str> {
        match self {
            Self::Worker { worker, .. } => Some(worker),
            _ => None,
        }
    }

    /// Name of the tool at the root of this failure, if any.
    pub fn failing_tool(&self) -> Option<&str> {
        match self {
            Self::Tool { tool, .. } | Self::ToolTimeout { tool, .. } => Some(tool),
            Self::Worker { source, .. } => source.failing_tool(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuorumError>;
