//! Input normalisation and dosage scaling.

use std::collections::BTreeMap;

use foodlens_common::{FoodLensError, IngredientInput, Result};

/// Canonical form of an ingredient identifier: trimmed, lowercased.
pub fn normalise_ingredient_id(raw: &str) -> Result<String> {
    let id = raw.trim().to_lowercase();
    if id.is_empty() {
        return Err(FoodLensError::invalid("ingredient name must not be blank"));
    }
    Ok(id)
}

/// Grams must be present, finite and non-negative. No default dose is inferred.
pub fn validate_grams(ingredient: &str, grams: Option<f64>) -> Result<f64> {
    match grams {
        None => Err(FoodLensError::invalid(format!("missing grams for '{ingredient}'"))),
        Some(g) if !g.is_finite() => {
            Err(FoodLensError::invalid(format!("grams for '{ingredient}' must be a finite number")))
        }
        Some(g) if g < 0.0 => {
            Err(FoodLensError::invalid(format!("grams for '{ingredient}' must be >= 0, got {g}")))
        }
        Some(g) => Ok(g),
    }
}

/// Normalise a request into `ingredient id → grams`.
///
/// Rejects an empty request, and two entries that collapse to the same id
/// once case and surrounding whitespace are ignored.
pub fn normalise_inputs(inputs: &[IngredientInput]) -> Result<BTreeMap<String, f64>> {
    if inputs.is_empty() {
        return Err(FoodLensError::invalid("at least one ingredient is required"));
    }

    let mut quantities = BTreeMap::new();
    for input in inputs {
        let id = normalise_ingredient_id(&input.ingredient)?;
        let grams = validate_grams(&id, input.grams)?;
        if quantities.insert(id.clone(), grams).is_some() {
            return Err(FoodLensError::invalid(format!(
                "ingredient '{id}' was given more than once"
            )));
        }
    }
    Ok(quantities)
}

/// Linear dosage normalisation: a weight is the risk at `reference_grams`.
///
/// Zero grams always yields exactly 0.0.
pub fn dosage_score(base_weight: f64, grams: f64, reference_grams: f64) -> f64 {
    if grams == 0.0 {
        return 0.0;
    }
    base_weight * (grams / reference_grams)
}
