//! Write path — embed, assign ids, commit the batch.
//!
//! [`memorize`] is the single entry point; storing one text is the n=1 case.
//! The batch is all-or-nothing at the embedding step: the first embedding
//! failure aborts before anything is written, discarding embeddings already
//! computed for earlier texts. A failure from the store's `add` leaves
//! whatever partial state the external store's own atomicity allows — this
//! service does not attempt recovery.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::embedding::Embedder;
use crate::error::Result;
use crate::store::{MemoryRecord, VectorStore};

/// Result returned from a successful memorize call.
#[derive(Debug, Serialize)]
pub struct MemorizeReceipt {
    /// Ids of the stored records, in input order.
    pub ids: Vec<String>,
    pub count: usize,
}

/// Default metadata applied when the caller supplies none.
pub fn default_metadata() -> serde_json::Value {
    json!({ "topic": "memory" })
}

/// Embed every text, then commit the whole batch in one add call.
///
/// The caller's single metadata value is cloned per record so items never
/// alias a shared mapping.
pub async fn memorize(
    embedder: &Arc<dyn Embedder>,
    store: &Arc<dyn VectorStore>,
    texts: &[String],
    metadata: Option<serde_json::Value>,
) -> Result<MemorizeReceipt> {
    let metadata = metadata.unwrap_or_else(default_metadata);

    // Fail fast: one embedding failure aborts the batch before any write.
    let mut embeddings = Vec::with_capacity(texts.len());
    for text in texts {
        embeddings.push(embedder.embed(text).await?);
    }

    store.ensure_collection().await?;

    let records: Vec<MemoryRecord> = texts
        .iter()
        .zip(embeddings)
        .map(|(text, embedding)| MemoryRecord {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.clone(),
            embedding,
            metadata: metadata.clone(),
        })
        .collect();

    store.add(&records).await?;

    let ids: Vec<String> = records.into_iter().map(|r| r.id).collect();
    tracing::info!(count = ids.len(), "texts memorized");

    Ok(MemorizeReceipt {
        count: ids.len(),
        ids,
    })
}
