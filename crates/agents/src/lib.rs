//! Agents for Quorum.
//!
//! - [`Agent`]: the capability root. Every agent has a name, a handle to the
//!   shared memory and an ordered set of tools
//! - [`WorkerAgent`]: runs each attached tool against a query, merges the
//!   outputs and records them under its own name
//!
//! ```text
//!        Query
//!          │
//!          ▼
//!   ┌─────────────┐     ┌────────┐
//!   │ WorkerAgent │────►│ Tool 1 │
//!   │             │────►│ Tool 2 │
//!   └──────┬──────┘     └────────┘
//!          │ store(name, WorkerOutput)
//!          ▼
//!   ┌─────────────┐
//!   │   Memory    │
//!   └─────────────┘
//! ```

pub mod agent;
pub mod record;
pub mod worker;

pub use agent::{Agent, AgentCore};
pub use record::{MemoryRecord, SharedMemory};
pub use worker::WorkerAgent;
