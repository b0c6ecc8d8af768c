//! Wiring a supervisor, its workers and their tools from configuration.

use crate::config::CoordinatorConfig;
use crate::supervisor::SupervisorAgent;
use quorum_agents::{SharedMemory, WorkerAgent};
use quorum_common::{QuorumError, Result, Tool};
use quorum_memory::{MemoryStore, RetrievalTool};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// A ready-to-use supervisor and the memory it shares with its workers.
pub struct Assembly {
    pub memory: SharedMemory,
    pub supervisor: SupervisorAgent,
}

impl CoordinatorConfig {
    /// Build the agent hierarchy around a fresh memory store.
    pub fn build(&self) -> Result<Assembly> {
        let memory: SharedMemory = MemoryStore::shared();
        let supervisor = self.build_with_memory(memory.clone())?;
        Ok(Assembly { memory, supervisor })
    }

    /// Build the agent hierarchy around an existing memory store.
    pub fn build_with_memory(&self, memory: SharedMemory) -> Result<SupervisorAgent> {
        self.validate()?;

        let mut tools: HashMap<&str, Arc<dyn Tool>> = HashMap::new();
        for tool in &self.tools {
            let retrieval = RetrievalTool::new(tool.name.clone(), tool.entries.clone())?
                .with_default_top_k(tool.top_k);
            tools.insert(tool.name.as_str(), Arc::new(retrieval));
        }

        let timeout = self.tool_timeout_ms.map(Duration::from_millis);
        let mut workers = Vec::with_capacity(self.workers.len());
        for worker_config in &self.workers {
            let mut worker = WorkerAgent::new(worker_config.name.clone(), memory.clone());
            for name in &worker_config.tools {
                let tool = tools.get(name.as_str()).ok_or_else(|| {
                    QuorumError::Config(format!(
                        "Worker '{}' references unknown tool '{}'",
                        worker_config.name, name
                    ))
                })?;
                worker = worker.with_tool(tool.clone());
            }
            if let Some(limit) = timeout {
                worker = worker.with_tool_timeout(limit);
            }
            workers.push(worker);
        }

        info!(
            supervisor = %self.supervisor,
            workers = workers.len(),
            tools = tools.len(),
            mode = ?self.execution,
            "Assembled agent hierarchy"
        );

        Ok(SupervisorAgent::new(self.supervisor.clone(), memory)
            .with_execution_mode(self.execution)
            .with_workers(workers))
    }
}
