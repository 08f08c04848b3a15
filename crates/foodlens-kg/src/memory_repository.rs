//! In-memory evidence store.
//!
//! Holds a fixed edge list and answers the same contract as the graph
//! store. Used by tests and by offline demos of the dashboard.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use foodlens_common::{Edge, Result};

use crate::repository::{ensure_non_empty, EvidenceStore};

#[derive(Debug, Default)]
pub struct InMemoryEvidenceStore {
    edges: Vec<Edge>,
    queries: AtomicUsize,
}

impl InMemoryEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge. The ingredient name is stored lowercased, the way the
    /// graph adapter returns it.
    pub fn with_edge(mut self, ingredient: &str, disease: &str, weight: f64) -> Self {
        self.edges.push(Edge::new(ingredient.trim().to_lowercase(), disease, weight));
        self
    }

    pub fn with_edges(self, edges: impl IntoIterator<Item = (&'static str, &'static str, f64)>) -> Self {
        edges.into_iter().fold(self, |store, (i, d, w)| store.with_edge(i, d, w))
    }

    /// Number of `fetch_edges` retrievals served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[async_trait]
impl EvidenceStore for InMemoryEvidenceStore {
    async fn fetch_edges(&self, ingredient_ids: &BTreeSet<String>) -> Result<Vec<Edge>> {
        ensure_non_empty(ingredient_ids)?;
        self.queries.fetch_add(1, Ordering::SeqCst);

        Ok(self
            .edges
            .iter()
            .filter(|e| ingredient_ids.contains(&e.ingredient))
            .cloned()
            .collect())
    }

    async fn list_ingredients(&self) -> Result<Vec<String>> {
        let names: BTreeSet<&str> = self.edges.iter().map(|e| e.ingredient.as_str()).collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
