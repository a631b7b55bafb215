//! Chroma HTTP client.
//!
//! Talks to a Chroma server's REST API: collections are resolved by name with
//! `get_or_create`, then adds and queries are issued against the resolved
//! collection id. The collection id is cached after the first resolution —
//! Chroma's get-or-create is idempotent, so racing resolutions converge on
//! the same id.
//!
//! The collection is created with cosine space, which is the distance scale
//! the relevance band thresholds are calibrated to.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::sync::OnceCell;

use super::{MemoryRecord, QueryHit, VectorStore};
use crate::error::{MemoryError, Result};

pub struct ChromaStore {
    client: reqwest::Client,
    base_url: String,
    collection_name: String,
    collection_id: OnceCell<String>,
}

#[derive(Deserialize)]
struct CollectionResponse {
    id: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    /// Chroma nests one list per query embedding; we always send exactly one.
    documents: Option<Vec<Vec<String>>>,
    distances: Option<Vec<Vec<f64>>>,
}

impl ChromaStore {
    pub fn new(base_url: String, collection_name: String, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MemoryError::Store(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection_name,
            collection_id: OnceCell::new(),
        })
    }

    /// Resolve (and cache) the collection id via get-or-create.
    async fn collection_id(&self) -> Result<&str> {
        self.collection_id
            .get_or_try_init(|| async {
                let url = format!("{}/api/v1/collections", self.base_url);
                let body = json!({
                    "name": self.collection_name,
                    "get_or_create": true,
                    "metadata": { "hnsw:space": "cosine" },
                });

                let response = self
                    .client
                    .post(&url)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| {
                        MemoryError::Store(format!("get-or-create collection failed: {e}"))
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let detail = response.text().await.unwrap_or_default();
                    return Err(MemoryError::Store(format!(
                        "get-or-create collection returned HTTP {status}: {detail}"
                    )));
                }

                let collection: CollectionResponse = response.json().await.map_err(|e| {
                    MemoryError::Store(format!("malformed collection response: {e}"))
                })?;

                tracing::debug!(
                    collection = %self.collection_name,
                    id = %collection.id,
                    "collection resolved"
                );
                Ok(collection.id)
            })
            .await
            .map(String::as_str)
    }

    /// POST a collection-scoped operation, mapping any failure to a store error.
    async fn post_op(&self, op: &str, body: serde_json::Value) -> Result<reqwest::Response> {
        let id = self.collection_id().await?;
        let url = format!("{}/api/v1/collections/{}/{}", self.base_url, id, op);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MemoryError::Store(format!("{op} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MemoryError::Store(format!(
                "{op} returned HTTP {status}: {detail}"
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl VectorStore for ChromaStore {
    async fn ensure_collection(&self) -> Result<()> {
        self.collection_id().await?;
        Ok(())
    }

    async fn add(&self, records: &[MemoryRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        // Split records into the wire format's parallel arrays.
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        let embeddings: Vec<&[f32]> = records.iter().map(|r| r.embedding.as_slice()).collect();
        let documents: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let metadatas: Vec<&serde_json::Value> = records.iter().map(|r| &r.metadata).collect();

        self.post_op(
            "add",
            json!({
                "ids": ids,
                "embeddings": embeddings,
                "documents": documents,
                "metadatas": metadatas,
            }),
        )
        .await?;

        tracing::debug!(count = records.len(), "records added to collection");
        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<QueryHit>> {
        let response = self
            .post_op(
                "query",
                json!({
                    "query_embeddings": [embedding],
                    "n_results": k,
                    "include": ["documents", "distances"],
                }),
            )
            .await?;

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| MemoryError::Store(format!("malformed query response: {e}")))?;

        let texts = body
            .documents
            .and_then(|mut d| (!d.is_empty()).then(|| d.remove(0)))
            .unwrap_or_default();
        let distances = body
            .distances
            .and_then(|mut d| (!d.is_empty()).then(|| d.remove(0)))
            .unwrap_or_default();

        if texts.len() != distances.len() {
            return Err(MemoryError::Store(format!(
                "query returned {} documents but {} distances",
                texts.len(),
                distances.len()
            )));
        }

        Ok(texts
            .into_iter()
            .zip(distances)
            .map(|(text, distance)| QueryHit { text, distance })
            .collect())
    }
}
