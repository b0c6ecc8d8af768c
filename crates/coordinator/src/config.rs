//! Configuration for the coordinator.
//!
//! The configuration is a plain value handed to [`CoordinatorConfig::build`];
//! there is no process-wide settings singleton.
//!
//! # File security
//!
//! - Config file permission validation on Unix systems
//! - Rejects symlinks, directories and world-writable files

use crate::supervisor::ExecutionMode;
use anyhow::Context;
use quorum_common::{QuorumError, Result};
use quorum_memory::{CorpusEntry, DEFAULT_TOP_K};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Main coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Supervisor name, used as its memory key
    #[serde(default = "default_supervisor_name")]
    pub supervisor: String,

    /// How workers are invoked
    #[serde(default)]
    pub execution: ExecutionMode,

    /// Per-tool timeout in milliseconds (unbounded if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_timeout_ms: Option<u64>,

    /// Retrieval tools and their corpora
    #[serde(default)]
    pub tools: Vec<ToolConfig>,

    /// Workers in registration order
    #[serde(default)]
    pub workers: Vec<WorkerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Tool name, referenced by workers
    pub name: String,

    /// Default result limit
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Fixed corpus of labelled reference vectors
    #[serde(default)]
    pub entries: Vec<CorpusEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Worker name, used as its memory key
    pub name: String,

    /// Names of the tools attached to this worker, in order
    #[serde(default)]
    pub tools: Vec<String>,
}

fn default_supervisor_name() -> String {
    "supervisor".into()
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            supervisor: default_supervisor_name(),
            execution: ExecutionMode::default(),
            tool_timeout_ms: None,
            tools: Vec::new(),
            workers: Vec::new(),
        }
    }
}

impl CoordinatorConfig {
    /// Small built-in setup: one worker over a three-document 2-d corpus.
    pub fn demo() -> Self {
        Self {
            tools: vec![ToolConfig {
                name: "docs".into(),
                top_k: default_top_k(),
                entries: vec![
                    CorpusEntry::new("doc-A", vec![1.0, 0.0]),
                    CorpusEntry::new("doc-B", vec![0.0, 1.0]),
                    CorpusEntry::new("doc-C", vec![1.0, 1.0]),
                ],
            }],
            workers: vec![WorkerConfig {
                name: "retriever".into(),
                tools: vec!["docs".into()],
            }],
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// On Unix systems, this validates that the file is a regular file and
    /// is not world-writable before reading it.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        #[cfg(unix)]
        validate_config_file_permissions(path)?;

        Self::from_file_unchecked(path)
    }

    /// Load configuration from a TOML file without permission checks.
    ///
    /// Use this only for testing or when you've already validated the file.
    pub fn from_file_unchecked(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check names and cross references.
    pub fn validate(&self) -> Result<()> {
        if self.supervisor.trim().is_empty() {
            return Err(QuorumError::Config("Supervisor name is empty".into()));
        }

        let mut tool_names = HashSet::new();
        for tool in &self.tools {
            if tool.name.trim().is_empty() {
                return Err(QuorumError::Config("Tool name is empty".into()));
            }
            if !tool_names.insert(tool.name.as_str()) {
                return Err(QuorumError::Config(format!(
                    "Duplicate tool name '{}'",
                    tool.name
                )));
            }
        }

        let mut worker_names = HashSet::new();
        for worker in &self.workers {
            if worker.name.trim().is_empty() {
                return Err(QuorumError::Config("Worker name is empty".into()));
            }
            if worker.name == self.supervisor {
                return Err(QuorumError::Config(format!(
                    "Worker '{}' shares its memory key with the supervisor",
                    worker.name
                )));
            }
            if !worker_names.insert(worker.name.as_str()) {
                return Err(QuorumError::Config(format!(
                    "Duplicate worker name '{}'",
                    worker.name
                )));
            }
            for tool in &worker.tools {
                if !tool_names.contains(tool.as_str()) {
                    return Err(QuorumError::Config(format!(
                        "Worker '{}' references unknown tool '{}'",
                        worker.name, tool
                    )));
                }
            }
        }

        if self.tool_timeout_ms == Some(0) {
            warn!("tool_timeout_ms is 0, every tool invocation will time out");
        }

        Ok(())
    }
}

/// Validate config file permissions on Unix systems.
///
/// Requirements:
/// - File must be a regular file (not symlink, directory, etc.)
/// - File must not be world-writable (mode & 0o002 == 0)
#[cfg(unix)]
fn validate_config_file_permissions(path: &std::path::Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

    if !metadata.is_file() {
        anyhow::bail!(
            "Config path '{}' is not a regular file. Symlinks and directories are not allowed.",
            path.display()
        );
    }

    let permission_bits = metadata.permissions().mode() & 0o777;

    if permission_bits & 0o002 != 0 {
        anyhow::bail!(
            "Config file '{}' is world-writable (mode {:04o}). \
             Fix with: chmod o-w {}",
            path.display(),
            permission_bits,
            path.display()
        );
    }

    Ok(())
}
