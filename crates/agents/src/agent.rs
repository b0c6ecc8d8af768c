//! Capability root shared by every agent.

use crate::record::SharedMemory;
use async_trait::async_trait;
use quorum_common::{Query, Result, Tool};
use std::fmt;
use std::sync::Arc;

/// State every agent carries: its name, the shared memory and its tools.
#[derive(Clone)]
pub struct AgentCore {
    name: String,
    memory: SharedMemory,
    tools: Vec<Arc<dyn Tool>>,
}

impl AgentCore {
    pub fn new(name: impl Into<String>, memory: SharedMemory) -> Self {
        Self {
            name: name.into(),
            memory,
            tools: Vec::new(),
        }
    }

    /// Attach a tool. Tools run in attachment order.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn memory(&self) -> &SharedMemory {
        &self.memory
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }
}

impl fmt::Debug for AgentCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentCore")
            .field("name", &self.name)
            .field(
                "tools",
                &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// The contract every agent satisfies.
///
/// Agents are built once and reused across queries. They hold no per-query
/// state; the only side effect of handling a query is what they append to
/// memory.
#[async_trait]
pub trait Agent: Send + Sync {
    /// What handling a query produces.
    type Output: Send;

    fn core(&self) -> &AgentCore;

    /// Name of the agent, also its memory key.
    fn name(&self) -> &str {
        self.core().name()
    }

    fn memory(&self) -> &SharedMemory {
        self.core().memory()
    }

    fn tools(&self) -> &[Arc<dyn Tool>] {
        self.core().tools()
    }

    /// Handle a query.
    async fn handle(&self, query: &Query) -> Result<Self::Output>;
}
