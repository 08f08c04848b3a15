//! foodlens-kg — Evidence store adapter over the ingredient/disease knowledge graph.
//!
//! The store is an external collaborator; this crate only wraps the single
//! retrieval the scoring engine needs, plus a couple of read-only helpers
//! for the dashboard.

pub mod repository;
pub mod memory_repository;
pub mod neo4j_repository;

pub use repository::EvidenceStore;
pub use memory_repository::InMemoryEvidenceStore;
pub use neo4j_repository::Neo4jEvidenceStore;
