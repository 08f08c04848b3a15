//! Evidence store against a live Neo4j instance.
//!
//! Requires a reachable graph with Ingredient/Disease nodes. Run with:
//! ```bash
//! FOODLENS_STORE_URI=neo4j://127.0.0.1:7687 FOODLENS_STORE_PASSWORD=... \
//!   cargo test --package foodlens-kg --test test_neo4j_store -- --ignored --nocapture
//! ```

use std::collections::BTreeSet;

use foodlens_common::{FoodLensError, StoreConfig};
use foodlens_kg::{EvidenceStore, Neo4jEvidenceStore};

fn store_config() -> StoreConfig {
    let mut config = StoreConfig::default();
    if let Ok(uri) = std::env::var("FOODLENS_STORE_URI") {
        config.uri = uri;
    }
    if let Ok(user) = std::env::var("FOODLENS_STORE_USER") {
        config.user = user;
    }
    config
}

#[tokio::test(flavor = "multi_thread")]
#[ignore] // Requires a Neo4j instance
async fn test_fetch_edges_for_known_ingredients() {
    let _ = tracing_subscriber::fmt::try_init();

    let store = Neo4jEvidenceStore::connect(&store_config())
        .await
        .expect("Failed to connect to Neo4j");
    store.ping().await.expect("ping failed");

    let known = store.list_ingredients().await.expect("list_ingredients failed");
    println!("Store knows {} ingredients", known.len());
    let Some(first) = known.first() else {
        println!("Empty graph, nothing to fetch");
        return;
    };

    let ids: BTreeSet<String> = [first.clone()].into_iter().collect();
    let edges = store.fetch_edges(&ids).await.expect("fetch_edges failed");
    for edge in &edges {
        println!("{} -> {} ({:.3})", edge.ingredient, edge.disease, edge.base_weight);
        assert_eq!(&edge.ingredient, first);
    }
}

#[tokio::test(flavor = "multi_thread")]
#[ignore] // Requires a Neo4j instance
async fn test_empty_request_rejected_before_query() {
    let store = Neo4jEvidenceStore::connect(&store_config())
        .await
        .expect("Failed to connect to Neo4j");
    let err = store.fetch_edges(&BTreeSet::new()).await.unwrap_err();
    assert!(matches!(err, FoodLensError::InvalidArgument(_)));
}
