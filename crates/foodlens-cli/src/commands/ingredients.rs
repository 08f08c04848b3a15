use anyhow::Result;
use foodlens_ranker::RiskEngine;

pub async fn execute(engine: &RiskEngine) -> Result<()> {
    let names = engine.store().list_ingredients().await?;
    if names.is_empty() {
        println!("The evidence store has no ingredients.");
        return Ok(());
    }
    for name in &names {
        println!("{name}");
    }
    eprintln!("{} ingredients", names.len());
    Ok(())
}
