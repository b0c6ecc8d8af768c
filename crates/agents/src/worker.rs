//! Worker agent - runs its tools against a query and records the merged output.

use crate::agent::{Agent, AgentCore};
use crate::record::{MemoryRecord, SharedMemory};
use async_trait::async_trait;
use quorum_common::{Query, QuorumError, Result, ScoredDocument, Tool, ToolResult, WorkerOutput};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Agent that queries every attached tool and merges the results.
///
/// Tools are invoked one at a time in attachment order. The merged output is
/// appended to memory under the worker's name before it is returned, even
/// when the worker has no tools. If any tool fails the task fails and nothing
/// is recorded.
#[derive(Debug, Clone)]
pub struct WorkerAgent {
    core: AgentCore,
    tool_timeout: Option<Duration>,
}

impl WorkerAgent {
    pub fn new(name: impl Into<String>, memory: SharedMemory) -> Self {
        Self {
            core: AgentCore::new(name, memory),
            tool_timeout: None,
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.core = self.core.with_tool(tool);
        self
    }

    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.core = self.core.with_tools(tools);
        self
    }

    /// Bound each tool invocation. A tool that exceeds it fails the task.
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }

    pub fn tool_timeout(&self) -> Option<Duration> {
        self.tool_timeout
    }

    /// Run every tool against `query`, record the merged output and return it.
    #[instrument(skip(self, query), fields(agent = %self.core.name(), query_id = %query.id))]
    pub async fn process_task(&self, query: &Query) -> Result<WorkerOutput> {
        let start = Instant::now();
        let name = self.core.name();

        info!(tools = self.core.tools().len(), "Processing task");

        let mut output = WorkerOutput::empty(name);
        for tool in self.core.tools() {
            let matches = self.run_tool(tool.as_ref(), query).await.map_err(|e| {
                warn!(tool = %tool.name(), error = %e, "Tool failed");
                e
            })?;

            debug!(tool = %tool.name(), matches = matches.len(), "Tool completed");

            output.tool_results.push(ToolResult {
                tool: tool.name().to_string(),
                matches,
            });
        }

        self.core
            .memory()
            .store(name, MemoryRecord::Worker(output.clone()))
            .await;

        info!(
            matches = output.match_count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Task completed"
        );

        Ok(output)
    }

    async fn run_tool(&self, tool: &dyn Tool, query: &Query) -> Result<Vec<ScoredDocument>> {
        let result = match self.tool_timeout {
            Some(limit) => tokio::time::timeout(limit, tool.query(query))
                .await
                .map_err(|_| QuorumError::ToolTimeout {
                    tool: tool.name().to_string(),
                    timeout_ms: limit.as_millis() as u64,
                })?,
            None => tool.query(query).await,
        };

        // Make sure every failure names the tool it came from
        result.map_err(|e| {
            if e.failing_tool().is_some() {
                e
            } else {
                QuorumError::tool(tool.name(), e.to_string())
            }
        })
    }
}

#[async_trait]
impl Agent for WorkerAgent {
    type Output = WorkerOutput;

    fn core(&self) -> &AgentCore {
        &self.core
    }

    async fn handle(&self, query: &Query) -> Result<WorkerOutput> {
        self.process_task(query).await
    }
}
