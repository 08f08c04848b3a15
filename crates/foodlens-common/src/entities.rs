/// Core types flowing between the evidence store and the scoring engine.
/// Nothing here is persisted; every value lives for a single request.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ingredient input
// ---------------------------------------------------------------------------

/// One (ingredient, quantity) pair supplied by the caller.
///
/// `grams` is optional so that the input layer can forward a missing
/// quantity; the engine rejects it rather than guessing a dose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientInput {
    pub ingredient: String,
    pub grams: Option<f64>,
}

impl IngredientInput {
    pub fn new(ingredient: impl Into<String>, grams: f64) -> Self {
        Self { ingredient: ingredient.into(), grams: Some(grams) }
    }

    /// An input whose quantity was not supplied.
    pub fn without_grams(ingredient: impl Into<String>) -> Self {
        Self { ingredient: ingredient.into(), grams: None }
    }
}

impl<S: Into<String>> From<(S, f64)> for IngredientInput {
    fn from((ingredient, grams): (S, f64)) -> Self {
        Self::new(ingredient, grams)
    }
}

// ---------------------------------------------------------------------------
// Evidence edge (read from the store)
// ---------------------------------------------------------------------------

/// An ingredient → disease association recorded in the knowledge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub ingredient: String,
    pub disease: String,
    /// Evidence strength at the reference dose. Not bounded.
    pub base_weight: f64,
}

impl Edge {
    pub fn new(ingredient: impl Into<String>, disease: impl Into<String>, base_weight: f64) -> Self {
        Self { ingredient: ingredient.into(), disease: disease.into(), base_weight }
    }
}

// ---------------------------------------------------------------------------
// Derived results
// ---------------------------------------------------------------------------

/// A single edge after dosage normalisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAssociation {
    pub ingredient: String,
    pub disease: String,
    pub score: f64,
}

/// Aggregated risk for one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRiskSummary {
    pub disease: String,
    pub score: f64,
    pub contributors: Vec<String>,
}

impl DiseaseRiskSummary {
    pub fn new(disease: impl Into<String>) -> Self {
        Self { disease: disease.into(), score: 0.0, contributors: Vec::new() }
    }

    /// Fold one surviving association into this summary.
    pub fn absorb(&mut self, association: &ScoredAssociation) {
        self.score += association.score;
        if !self.contributors.iter().any(|c| c == &association.ingredient) {
            self.contributors.push(association.ingredient.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absorb_sums_scores_and_keeps_first_seen_contributors() {
        let mut summary = DiseaseRiskSummary::new("diabetes");
        for (ingredient, score) in [("sugar", 0.6), ("syrup", 0.5), ("sugar", 0.7)] {
            summary.absorb(&ScoredAssociation {
                ingredient: ingredient.to_string(),
                disease: "diabetes".to_string(),
                score,
            });
        }
        assert!((summary.score - 1.8).abs() < 1e-9);
        assert_eq!(summary.contributors, vec!["sugar".to_string(), "syrup".to_string()]);
    }

    #[test]
    fn test_summary_serialises_to_table_row() {
        let summary = DiseaseRiskSummary {
            disease: "hypertension".into(),
            score: 1.2,
            contributors: vec!["salt".into()],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["disease"], "hypertension");
        assert_eq!(json["contributors"][0], "salt");
    }
}
