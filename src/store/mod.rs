//! Vector store adapter.
//!
//! Provides the [`VectorStore`] trait — a thin pass-through to an external
//! vector database's get-or-create-collection, add, and query operations,
//! scoped to one fixed collection name — and the Chroma HTTP implementation.

pub mod chroma;

use crate::error::Result;
use async_trait::async_trait;

/// One memorized item as written to the store. Immutable once written; the
/// id is a fresh random token, never derived from content.
#[derive(Debug, Clone)]
pub struct MemoryRecord {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
    pub metadata: serde_json::Value,
}

/// One nearest-neighbor match returned by a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryHit {
    pub text: String,
    pub distance: f64,
}

/// Collection-scoped operations on the external vector store.
///
/// Implementations surface underlying errors verbatim as
/// [`MemoryError::Store`]; there is no partial-success recovery here. An
/// `add` call either lands entirely or reports failure — whatever atomicity
/// the external store provides is what the caller gets.
///
/// [`MemoryError::Store`]: crate::error::MemoryError::Store
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Idempotent get-or-create of the well-known collection.
    async fn ensure_collection(&self) -> Result<()>;

    /// Add a batch of records. The record struct keeps ids, embeddings,
    /// texts, and metadata aligned by construction.
    async fn add(&self, records: &[MemoryRecord]) -> Result<()>;

    /// Return up to `k` nearest items, ascending by distance.
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<QueryHit>>;
}

/// Create the vector store client from config.
pub fn create_store(
    config: &crate::config::MnemoConfig,
) -> Result<std::sync::Arc<dyn VectorStore>> {
    let store = chroma::ChromaStore::new(
        config.store_url(),
        config.store.collection.clone(),
        config.store.timeout_secs,
    )?;
    Ok(std::sync::Arc::new(store))
}
