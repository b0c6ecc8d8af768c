//! Common types and traits shared across Quorum crates.
//!
//! This crate provides the foundational abstractions that tools, agents
//! and the coordinator use to communicate.

pub mod error;
pub mod output;
pub mod query;
pub mod traits;

pub use error::{QuorumError, Result};
pub use output::{ScoredDocument, ToolResult, WorkerOutput};
pub use query::Query;
pub use traits::Tool;
