//! Shared memory and retrieval for Quorum agents.
//!
//! - [`MemoryStore`]: append-only history keyed by agent name, shared by a
//!   supervisor and all of its workers
//! - [`RetrievalTool`]: cosine-similarity ranking over a fixed embedding
//!   corpus, exposed to agents through the [`Tool`](quorum_common::Tool) trait
//!
//! ```text
//!   Supervisor ──┐
//!   Worker 1 ────┼──► MemoryStore (key = agent name, value = history)
//!   Worker 2 ────┘
//!       │
//!       └──► RetrievalTool (N x D matrix + labels, immutable)
//! ```

pub mod retrieval;
pub mod store;
pub mod types;

pub use retrieval::RetrievalTool;
pub use store::{MemorySnapshot, MemoryStore};
pub use types::{CorpusEntry, DEFAULT_TOP_K};
