//! Integration tests for worker agents backed by real retrieval tools.

use quorum_agents::{Agent, MemoryRecord, SharedMemory, WorkerAgent};
use quorum_common::{Query, QuorumError, Tool};
use quorum_memory::{CorpusEntry, MemoryStore, RetrievalTool};
use std::sync::Arc;

fn retrieval(name: &str, entries: Vec<CorpusEntry>) -> Arc<dyn Tool> {
    Arc::new(RetrievalTool::new(name, entries).unwrap())
}

fn docs() -> Arc<dyn Tool> {
    retrieval(
        "docs",
        vec![
            CorpusEntry::new("doc-A", vec![1.0, 0.0]),
            CorpusEntry::new("doc-B", vec![0.0, 1.0]),
            CorpusEntry::new("doc-C", vec![1.0, 1.0]),
        ],
    )
}

fn notes() -> Arc<dyn Tool> {
    retrieval(
        "notes",
        vec![
            CorpusEntry::new("note-Z", vec![0.0, 0.0]),
            CorpusEntry::new("note-A", vec![1.0, 0.0]),
        ],
    )
}

/// Runs any agent and returns how many records it left under its own key.
async fn run_and_count<A: Agent>(agent: &A, query: &Query) -> usize {
    agent.handle(query).await.unwrap();
    agent.memory().len(agent.name()).await
}

#[tokio::test]
async fn test_worker_merges_tools_in_attachment_order() {
    let memory: SharedMemory = MemoryStore::shared();
    let worker = WorkerAgent::new("retriever", memory.clone())
        .with_tool(docs())
        .with_tool(notes());

    let output = worker
        .process_task(&Query::new(vec![1.0, 0.0]).with_top_k(2))
        .await
        .unwrap();

    let tools: Vec<&str> = output.tool_results.iter().map(|r| r.tool.as_str()).collect();
    assert_eq!(tools, vec!["docs", "notes"]);

    let docs = output.for_tool("docs").unwrap();
    assert_eq!(docs[0].label, "doc-A");
    assert_eq!(docs[1].label, "doc-C");

    let notes = output.for_tool("notes").unwrap();
    assert_eq!(notes[0].label, "note-A");
    assert_eq!(notes[1].label, "note-Z");
    assert_eq!(notes[1].score, 0.0);
}

#[tokio::test]
async fn test_worker_records_each_query() {
    let memory: SharedMemory = MemoryStore::shared();
    let worker = WorkerAgent::new("retriever", memory.clone()).with_tool(docs());

    worker.process_task(&Query::new(vec![1.0, 0.0])).await.unwrap();
    worker.process_task(&Query::new(vec![0.0, 1.0])).await.unwrap();

    let records = memory.retrieve("retriever").await;
    assert_eq!(records.len(), 2);

    let first = records[0].as_worker().unwrap();
    let second = records[1].as_worker().unwrap();
    assert_eq!(first.for_tool("docs").unwrap()[0].label, "doc-A");
    assert_eq!(second.for_tool("docs").unwrap()[0].label, "doc-B");
}

#[tokio::test]
async fn test_workers_share_memory_under_distinct_keys() {
    let memory: SharedMemory = MemoryStore::shared();
    let shared_tool = docs();
    let alpha = WorkerAgent::new("alpha", memory.clone()).with_tool(shared_tool.clone());
    let beta = WorkerAgent::new("beta", memory.clone()).with_tool(shared_tool);

    let query = Query::new(vec![1.0, 1.0]);
    assert_eq!(run_and_count(&alpha, &query).await, 1);
    assert_eq!(run_and_count(&beta, &query).await, 1);
    assert_eq!(run_and_count(&alpha, &query).await, 2);

    assert_eq!(memory.keys().await, vec!["alpha", "beta"]);
    assert_eq!(memory.total_records().await, 3);
}

#[tokio::test]
async fn test_dimension_mismatch_aborts_worker() {
    let memory: SharedMemory = MemoryStore::shared();
    let worker = WorkerAgent::new("retriever", memory.clone())
        .with_tool(docs())
        .with_tool(notes());

    let err = worker
        .process_task(&Query::new(vec![1.0, 0.0, 0.0]))
        .await
        .unwrap_err();

    assert!(matches!(err, QuorumError::Tool { ref tool, .. } if tool == "docs"));
    assert_eq!(memory.len("retriever").await, 0);
}

#[tokio::test]
async fn test_toolless_worker_records_empty_output() {
    let memory: SharedMemory = MemoryStore::shared();
    let worker = WorkerAgent::new("idle", memory.clone());

    let output = worker.handle(&Query::new(vec![1.0])).await.unwrap();
    assert!(output.is_empty());

    match memory.latest("idle").await {
        Some(MemoryRecord::Worker(recorded)) => assert_eq!(recorded, output),
        other => panic!("unexpected record: {:?}", other),
    }
}
