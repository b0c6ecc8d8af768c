//! Shared append-only memory keyed by agent name.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Append-only record of agent activity.
///
/// Every key maps to the ordered history of values stored under it. Keys are
/// never removed and existing values are never replaced. Reading a key that
/// was never written yields an empty history.
///
/// The store is shared by reference (`Arc<MemoryStore<V>>`) across a
/// supervisor and all its workers. Each append happens under the write lock,
/// so concurrent appends to the same key never lose or interleave values.
pub struct MemoryStore<V> {
    entries: RwLock<HashMap<String, Vec<V>>>,
}

impl<V> MemoryStore<V>
where
    V: Clone + Send + Sync,
{
    /// Create an empty memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create an empty store already wrapped for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Append `value` to the history under `key`.
    pub async fn store(&self, key: &str, value: V) {
        let mut entries = self.entries.write().await;
        let history = entries.entry(key.to_string()).or_default();
        history.push(value);

        debug!(key = %key, history_len = history.len(), "Stored memory record");
    }

    /// History under `key` in insertion order, empty if never written.
    pub async fn retrieve(&self, key: &str) -> Vec<V> {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Most recent value under `key`.
    pub async fn latest(&self, key: &str) -> Option<V> {
        self.entries
            .read()
            .await
            .get(key)
            .and_then(|history| history.last().cloned())
    }

    /// Number of values stored under `key`.
    pub async fn len(&self, key: &str) -> usize {
        self.entries.read().await.get(key).map_or(0, Vec::len)
    }

    /// All keys that have been written, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of values stored across all keys.
    pub async fn total_records(&self) -> usize {
        self.entries.read().await.values().map(Vec::len).sum()
    }

    /// Point-in-time copy of the whole store, ordered by key.
    pub async fn snapshot(&self) -> MemorySnapshot<V> {
        let entries = self.entries.read().await;
        MemorySnapshot {
            entries: entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl<V> Default for MemoryStore<V>
where
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable copy of a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MemorySnapshot<V> {
    pub entries: BTreeMap<String, Vec<V>>,
}

impl<V> MemorySnapshot<V> {
    pub fn get(&self, key: &str) -> &[V] {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_retrieve_unknown_key_is_empty() {
        let store: MemoryStore<String> = MemoryStore::new();

        assert!(store.retrieve("nobody").await.is_empty());
        assert!(store.latest("nobody").await.is_none());
        assert_eq!(store.len("nobody").await, 0);
        assert!(store.keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_appends_in_call_order() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.store("worker", i).await;
        }

        assert_eq!(store.retrieve("worker").await, vec![0, 1, 2, 3, 4]);
        assert_eq!(store.latest("worker").await, Some(4));
        assert_eq!(store.len("worker").await, 5);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = MemoryStore::new();
        store.store("b", "second").await;
        store.store("a", "first").await;
        store.store("b", "third").await;

        assert_eq!(store.keys().await, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.retrieve("a").await, vec!["first"]);
        assert_eq!(store.retrieve("b").await, vec!["second", "third"]);
        assert_eq!(store.total_records().await, 3);
    }

    #[tokio::test]
    async fn test_retrieve_returns_copy() {
        let store = MemoryStore::new();
        store.store("k", 1).await;

        let mut history = store.retrieve("k").await;
        history.push(2);

        assert_eq!(store.retrieve("k").await, vec![1]);
    }

    #[tokio::test]
    async fn test_concurrent_appends_to_same_key() {
        let store: Arc<MemoryStore<usize>> = MemoryStore::shared();
        let mut handles = Vec::new();

        for i in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.store("shared", i).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut history = store.retrieve("shared").await;
        assert_eq!(history.len(), 50);
        history.sort();
        assert_eq!(history, (0..50).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_snapshot() {
        let store = MemoryStore::new();
        store.store("w1", 10).await;
        store.store("sup", 20).await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.get("w1"), &[10]);
        assert!(snapshot.get("missing").is_empty());

        // Later writes do not affect an existing snapshot
        store.store("w1", 11).await;
        assert_eq!(snapshot.get("w1"), &[10]);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"sup":[20],"w1":[10]}"#);
    }
}
