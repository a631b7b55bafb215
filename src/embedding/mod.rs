//! Text-to-vector embedding via an external embedding service.
//!
//! Provides the [`Embedder`] trait and the Ollama-backed implementation.
//! Vector dimensionality is owned by the embedding model; the core treats it
//! as opaque, but every vector in a collection must come from the same model
//! or distance comparisons silently degrade.

pub mod ollama;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for embedding text into vectors.
///
/// One call, one network round trip: implementations do not retry and do not
/// cache repeated inputs. A failed call returns [`MemoryError::Embedding`]
/// (transport error, non-success status, or malformed response).
///
/// [`MemoryError::Embedding`]: crate::error::MemoryError::Embedding
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text string into a vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Create the embedding client from config.
pub fn create_embedder(
    config: &crate::config::MnemoConfig,
) -> Result<std::sync::Arc<dyn Embedder>> {
    let client = ollama::OllamaEmbedder::new(
        config.embedding_url(),
        config.embedding.model.clone(),
        config.embedding.timeout_secs,
    )?;
    Ok(std::sync::Arc::new(client))
}
