//! Tool capability trait.
//!
//! Defined in `quorum-common` so the memory crate (which provides the
//! retrieval tool) and the agents crate (which runs tools) can both reference
//! it without depending on each other.

use crate::{Query, Result, ScoredDocument};
use async_trait::async_trait;

/// A capability object that maps a query to ranked matches.
///
/// Workers dispatch purely through this trait, so new tool kinds can be
/// attached without touching the worker.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, used as the key of its output within a worker result.
    fn name(&self) -> &str;

    /// Run the tool against a query.
    async fn query(&self, query: &Query) -> Result<Vec<ScoredDocument>>;
}
