//! Neo4j implementation of EvidenceStore.
//!
//! Graph shape: `(:Ingredient {name})-[:AFFECTS {weight}]->(:Disease {name})`.
//! The adapter never writes; weight filtering is left to the engine so that
//! the store query stays a plain lookup.

use std::collections::BTreeSet;

use async_trait::async_trait;
use foodlens_common::{Edge, FoodLensError, Result, StoreConfig};
use neo4rs::{query, ConfigBuilder, Graph};
use secrecy::ExposeSecret;
use tracing::{debug, info, warn};

use crate::repository::{ensure_non_empty, EvidenceStore};

const FETCH_EDGES_CYPHER: &str = r#"
MATCH (i:Ingredient)-[r:AFFECTS]->(d:Disease)
WHERE toLower(i.name) IN $ingredients
RETURN toLower(i.name) AS ingredient,
       d.name          AS disease,
       toFloat(r.weight) AS weight
"#;

const LIST_INGREDIENTS_CYPHER: &str = r#"
MATCH (i:Ingredient)
WHERE i.name IS NOT NULL
RETURN DISTINCT toLower(i.name) AS name
ORDER BY name
"#;

/// Neo4j-backed evidence store. `Graph` owns a connection pool, so one
/// instance is shared by every concurrent request.
#[derive(Clone)]
pub struct Neo4jEvidenceStore {
    graph: Graph,
    database: String,
}

impl Neo4jEvidenceStore {
    /// Build the connection pool from settings. The password is read from
    /// the environment variable named in `StoreConfig::password_env`.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let password = config.password()?;

        let neo_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(password.expose_secret())
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .build()
            .map_err(|e| FoodLensError::Config(format!("invalid store settings: {e}")))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| FoodLensError::Connection(format!("{}: {e}", config.uri)))?;

        info!(uri = %config.uri, database = %config.database, "Connected to evidence store");
        Ok(Self { graph, database: config.database.clone() })
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

#[async_trait]
impl EvidenceStore for Neo4jEvidenceStore {
    async fn fetch_edges(&self, ingredient_ids: &BTreeSet<String>) -> Result<Vec<Edge>> {
        ensure_non_empty(ingredient_ids)?;

        let names: Vec<String> = ingredient_ids.iter().cloned().collect();
        let mut rows = self
            .graph
            .execute(query(FETCH_EDGES_CYPHER).param("ingredients", names))
            .await
            .map_err(|e| classify("fetch_edges", e))?;

        let mut edges = Vec::new();
        while let Some(row) = rows.next().await.map_err(|e| classify("fetch_edges", e))? {
            let ingredient: String = row
                .get("ingredient")
                .map_err(|e| FoodLensError::Query(format!("ingredient column: {e}")))?;
            let disease: String = row
                .get("disease")
                .map_err(|e| FoodLensError::Query(format!("disease column: {e}")))?;
            let weight: Option<f64> = row
                .get("weight")
                .map_err(|e| FoodLensError::Query(format!("weight column: {e}")))?;

            match weight {
                Some(base_weight) => edges.push(Edge { ingredient, disease, base_weight }),
                None => warn!(%ingredient, %disease, "Skipping AFFECTS edge without a weight"),
            }
        }

        debug!(requested = ingredient_ids.len(), edges = edges.len(), "fetch_edges complete");
        Ok(edges)
    }

    async fn list_ingredients(&self) -> Result<Vec<String>> {
        let mut rows = self
            .graph
            .execute(query(LIST_INGREDIENTS_CYPHER))
            .await
            .map_err(|e| classify("list_ingredients", e))?;

        let mut names = Vec::new();
        while let Some(row) = rows.next().await.map_err(|e| classify("list_ingredients", e))? {
            let name: String = row
                .get("name")
                .map_err(|e| FoodLensError::Query(format!("name column: {e}")))?;
            names.push(name);
        }
        Ok(names)
    }

    async fn ping(&self) -> Result<()> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| classify("ping", e))
    }
}

/// Transport failures are connection errors; anything the server answered
/// with (syntax, auth, constraint) is a query error.
fn classify(operation: &str, err: neo4rs::Error) -> FoodLensError {
    match &err {
        neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError => {
            FoodLensError::Connection(format!("{operation}: {err}"))
        }
        _ => FoodLensError::Query(format!("{operation}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_query_has_no_weight_filter() {
        assert!(FETCH_EDGES_CYPHER.contains("$ingredients"));
        assert!(!FETCH_EDGES_CYPHER.contains("weight >"));
    }

    #[test]
    fn test_connection_failures_are_classified() {
        let err = classify("fetch_edges", neo4rs::Error::ConnectionError);
        assert!(matches!(err, FoodLensError::Connection(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_connect_without_password_is_config_error() {
        let config = StoreConfig {
            password_env: "FOODLENS_TEST_UNSET_PASSWORD_VAR".to_string(),
            ..Default::default()
        };
        let err = Neo4jEvidenceStore::connect(&config).await.err().unwrap();
        assert!(matches!(err, FoodLensError::Config(_)));
    }
}
