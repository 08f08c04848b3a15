//! Evidence store trait - the query contract the scoring engine relies on.

use std::collections::BTreeSet;

use async_trait::async_trait;
use foodlens_common::{Edge, FoodLensError, Result};

/// Read-only access to ingredient → disease evidence edges.
///
/// Implementations can use:
/// - a Neo4j graph (production)
/// - an in-memory edge list (tests, demos)
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Return every edge whose ingredient endpoint is in `ingredient_ids`.
    ///
    /// Exactly one retrieval per call, no retries, no filtering on weight.
    /// Ordering of the returned edges is not part of the contract.
    /// An empty id set is rejected with `InvalidArgument`.
    async fn fetch_edges(&self, ingredient_ids: &BTreeSet<String>) -> Result<Vec<Edge>>;

    /// Distinct ingredient names known to the store, sorted.
    async fn list_ingredients(&self) -> Result<Vec<String>>;

    /// Cheap reachability check.
    async fn ping(&self) -> Result<()>;
}

/// Shared guard for the non-empty precondition of `fetch_edges`.
pub(crate) fn ensure_non_empty(ingredient_ids: &BTreeSet<String>) -> Result<()> {
    if ingredient_ids.is_empty() {
        return Err(FoodLensError::invalid("fetch_edges requires at least one ingredient id"));
    }
    Ok(())
}
