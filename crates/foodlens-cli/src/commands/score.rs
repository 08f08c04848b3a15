use anyhow::{Context, Result};
use clap::Args;
use foodlens_common::{DiseaseRiskSummary, IngredientInput};
use foodlens_ranker::RiskEngine;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Ingredients as `name=grams`, e.g. `sugar=100 "olive oil=15"`
    #[arg(required = true, value_parser = parse_pair)]
    pub ingredients: Vec<IngredientInput>,

    /// Override the significance threshold
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Show at most this many diseases
    #[arg(long)]
    pub top: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn parse_pair(raw: &str) -> std::result::Result<IngredientInput, String> {
    let (name, grams) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected name=grams, got '{raw}'"))?;
    let grams: f64 = grams
        .trim()
        .trim_end_matches('g')
        .parse()
        .map_err(|_| format!("'{grams}' is not a quantity in grams"))?;
    Ok(IngredientInput::new(name.trim(), grams))
}

pub async fn execute(engine: &RiskEngine, args: ScoreArgs) -> Result<()> {
    let mut scoring = engine.config().clone();
    if let Some(threshold) = args.threshold {
        scoring.significance_threshold = threshold;
    }
    if args.top.is_some() {
        scoring.max_results = args.top;
    }
    let engine = engine.with_scoring(scoring).context("invalid scoring options")?;

    let ranked = engine.compute_risks(&args.ingredients).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        print!("{}", render_table(&ranked));
    }
    Ok(())
}

pub fn render_table(ranked: &[DiseaseRiskSummary]) -> String {
    if ranked.is_empty() {
        return "No significant risk found.\n".to_string();
    }

    let width = ranked.iter().map(|r| r.disease.chars().count()).max().unwrap_or(0).max("DISEASE".len());
    let mut out = format!("{:>3}  {:<width$}  {:>8}  CONTRIBUTORS\n", "#", "DISEASE", "SCORE");
    for (i, r) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<width$}  {:>8.3}  {}\n",
            i + 1,
            r.disease,
            r.score,
            r.contributors.join(", ")
        ));
    }
    out
}
