//! Supervisor and wiring for Quorum.
//!
//! The coordinator is the top of the agent hierarchy:
//! 1. Receives a query
//! 2. Delegates it to every registered worker
//! 3. Collects worker outputs in registration order
//! 4. Records the aggregate and builds the final response
//!
//! # Architecture
//!
//! ```text
//!      Query
//!        │
//!        ▼
//! ┌─────────────────┐
//! │ SupervisorAgent │ ──► Memory["supervisor"]
//! └────────┬────────┘
//!    ┌─────┴─────┬──────────┐
//!    ▼           ▼          ▼
//! [Worker 1] [Worker 2] [Worker 3] ──► Memory["worker-n"]
//!    │           │          │
//!    ▼           ▼          ▼
//! [Tools]     [Tools]    [Tools]
//! ```

pub mod aggregate;
pub mod assembly;
pub mod config;
pub mod supervisor;

pub use aggregate::{
    from_fn, Aggregator, ConcatAggregator, FinalResponse, FnAggregator, StructuredAggregator,
};
pub use assembly::Assembly;
pub use config::{CoordinatorConfig, ToolConfig, WorkerConfig};
pub use supervisor::{ExecutionMode, SupervisorAgent};
