//! Risk engine: binds the scoring pipeline to an evidence store.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use foodlens_common::{
    DiseaseRiskSummary, Edge, FoodLensError, IngredientInput, Result, ScoringConfig,
};
use foodlens_kg::EvidenceStore;
use tracing::{debug, warn};

use crate::normalise::normalise_inputs;
use crate::scorer::score_and_rank;

/// Stateless between calls; clone freely and share across tasks.
#[derive(Clone)]
pub struct RiskEngine {
    store: Arc<dyn EvidenceStore>,
    config: ScoringConfig,
    store_timeout: Option<Duration>,
}

impl RiskEngine {
    pub fn new(store: Arc<dyn EvidenceStore>, config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config, store_timeout: None })
    }

    /// Bound the store retrieval. An elapsed timeout is reported as a
    /// connection error.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    /// Same store, different tunables (per-request overrides).
    pub fn with_scoring(&self, config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, ..self.clone() })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn EvidenceStore> {
        &self.store
    }

    /// Rank diseases by dosage-adjusted evidence for the submitted ingredients.
    ///
    /// An empty result means nothing significant was found. Store failures
    /// are returned as errors, never as an empty result.
    pub async fn compute_risks(&self, inputs: &[IngredientInput]) -> Result<Vec<DiseaseRiskSummary>> {
        let quantities = normalise_inputs(inputs)?;
        let ids: BTreeSet<String> = quantities.keys().cloned().collect();

        let edges = self.fetch(&ids).await?;
        let ranked = score_and_rank(&quantities, &edges, &self.config);

        debug!(
            ingredients = ids.len(),
            edges = edges.len(),
            diseases = ranked.len(),
            threshold = self.config.significance_threshold,
            "compute_risks complete"
        );
        Ok(ranked)
    }

    /// Mapping form of `compute_risks`.
    pub async fn compute_risks_map(&self, inputs: &HashMap<String, f64>) -> Result<Vec<DiseaseRiskSummary>> {
        let inputs: Vec<IngredientInput> = inputs
            .iter()
            .map(|(name, grams)| IngredientInput::new(name.clone(), *grams))
            .collect();
        self.compute_risks(&inputs).await
    }

    async fn fetch(&self, ids: &BTreeSet<String>) -> Result<Vec<Edge>> {
        let retrieval = self.store.fetch_edges(ids);
        let result = match self.store_timeout {
            Some(limit) => tokio::time::timeout(limit, retrieval).await.unwrap_or_else(|_| {
                Err(FoodLensError::Connection(format!(
                    "evidence store did not answer within {}ms",
                    limit.as_millis()
                )))
            }),
            None => retrieval.await,
        };

        result.inspect_err(|e| warn!(kind = e.kind(), error = %e, "Evidence retrieval failed"))
    }
}
