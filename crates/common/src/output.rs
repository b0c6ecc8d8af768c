//! Result types produced by tools and workers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A corpus document ranked against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// Document label
    pub label: String,

    /// Cosine similarity in `[-1, 1]`
    pub score: f32,
}

impl ScoredDocument {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4})", self.label, self.score)
    }
}

/// Output of a single tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that produced the matches
    pub tool: String,

    /// Matches in descending score order
    pub matches: Vec<ScoredDocument>,
}

/// Merged output of every tool attached to a worker, in attachment order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerOutput {
    /// Name of the worker
    pub worker: String,

    #[serde(default)]
    pub tool_results: Vec<ToolResult>,
}

impl WorkerOutput {
    pub fn empty(worker: impl Into<String>) -> Self {
        Self {
            worker: worker.into(),
            tool_results: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tool_results.is_empty()
    }

    /// Matches produced by the named tool, if it ran.
    pub fn for_tool(&self, tool: &str) -> Option<&[ScoredDocument]> {
        self.tool_results
            .iter()
            .find(|r| r.tool == tool)
            .map(|r| r.matches.as_slice())
    }

    /// Total number of matches across all tools.
    pub fn match_count(&self) -> usize {
        self.tool_results.iter().map(|r| r.matches.len()).sum()
    }
}

impl fmt::Display for WorkerOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tool_results.is_empty() {
            return write!(f, "[{}] no results", self.worker);
        }

        let parts: Vec<String> = self
            .tool_results
            .iter()
            .map(|r| {
                let matches = r
                    .matches
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {}", r.tool, matches)
            })
            .collect();

        write!(f, "[{}] {}", self.worker, parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WorkerOutput {
        WorkerOutput {
            worker: "w1".into(),
            tool_results: vec![
                ToolResult {
                    tool: "docs".into(),
                    matches: vec![
                        ScoredDocument::new("doc-A", 1.0),
                        ScoredDocument::new("doc-C", 0.7071),
                    ],
                },
                ToolResult {
                    tool: "faq".into(),
                    matches: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_worker_output_lookup() {
        let output = sample();

        assert_eq!(output.match_count(), 2);
        assert_eq!(output.for_tool("docs").unwrap()[0].label, "doc-A");
        assert!(output.for_tool("faq").unwrap().is_empty());
        assert!(output.for_tool("missing").is_none());
    }

    #[test]
    fn test_worker_output_display() {
        assert_eq!(
            sample().to_string(),
            "[w1] docs: doc-A (1.0000), doc-C (0.7071); faq: "
        );
        assert_eq!(WorkerOutput::empty("w2").to_string(), "[w2] no results");
    }

    #[test]
    fn test_empty_output() {
        let output = WorkerOutput::empty("idle");
        assert!(output.is_empty());
        assert_eq!(output.match_count(), 0);
    }
}
