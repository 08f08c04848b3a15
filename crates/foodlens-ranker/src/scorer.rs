//! Per-edge scoring, significance filtering, per-disease aggregation and ranking.
//!
//! Everything here is pure: the store call lives in `engine`, so the whole
//! ranking can be exercised with literal edge lists.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use foodlens_common::{DiseaseRiskSummary, Edge, ScoredAssociation, ScoringConfig};
use tracing::warn;

use crate::normalise::dosage_score;

/// Dosage-scale every edge that belongs to a submitted ingredient and keep
/// the ones whose score strictly exceeds the significance threshold.
///
/// Edges are visited in (ingredient, disease, weight) order so the output
/// does not depend on how the store happened to order its rows.
pub fn score_edges(
    quantities: &BTreeMap<String, f64>,
    edges: &[Edge],
    config: &ScoringConfig,
) -> Vec<ScoredAssociation> {
    let mut ordered: Vec<&Edge> = edges.iter().collect();
    ordered.sort_by(|a, b| {
        a.ingredient
            .cmp(&b.ingredient)
            .then_with(|| a.disease.cmp(&b.disease))
            .then_with(|| a.base_weight.total_cmp(&b.base_weight))
    });

    let mut scored = Vec::new();
    for edge in ordered {
        // The store may hand back more than was asked for; never report on
        // ingredients the caller did not submit.
        let Some(&grams) = quantities.get(&edge.ingredient) else {
            continue;
        };
        if !edge.base_weight.is_finite() {
            warn!(ingredient = %edge.ingredient, disease = %edge.disease, "Skipping edge with non-finite weight");
            continue;
        }

        let score = dosage_score(edge.base_weight, grams, config.dose_reference_grams);
        if score == 0.0 || score <= config.significance_threshold {
            continue;
        }

        scored.push(ScoredAssociation {
            ingredient: edge.ingredient.clone(),
            disease: edge.disease.clone(),
            score,
        });
    }
    scored
}

/// Sum surviving associations per disease. Contributors keep first-seen order.
pub fn aggregate_by_disease(associations: &[ScoredAssociation]) -> Vec<DiseaseRiskSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<DiseaseRiskSummary> = Vec::new();

    for association in associations {
        let slot = *index.entry(association.disease.as_str()).or_insert_with(|| {
            summaries.push(DiseaseRiskSummary::new(association.disease.clone()));
            summaries.len() - 1
        });
        summaries[slot].absorb(association);
    }
    summaries
}

/// Score descending, disease id ascending on ties, then optional truncation.
pub fn rank_summaries(
    mut summaries: Vec<DiseaseRiskSummary>,
    max_results: Option<usize>,
) -> Vec<DiseaseRiskSummary> {
    summaries.sort_by(|a, b| match b.score.total_cmp(&a.score) {
        Ordering::Equal => a.disease.cmp(&b.disease),
        other => other,
    });
    if let Some(limit) = max_results {
        summaries.truncate(limit);
    }
    summaries
}

/// The full store-free pipeline: score, filter, aggregate, rank.
pub fn score_and_rank(
    quantities: &BTreeMap<String, f64>,
    edges: &[Edge],
    config: &ScoringConfig,
) -> Vec<DiseaseRiskSummary> {
    let associations = score_edges(quantities, edges, config);
    rank_summaries(aggregate_by_disease(&associations), config.max_results)
}
