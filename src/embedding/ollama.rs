//! Ollama embedding client.
//!
//! Implements [`Embedder`] against Ollama's `/api/embeddings` endpoint:
//! request `{model, prompt}`, response `{embedding: [f32...]}`. Anything
//! else — connection failure, non-2xx status, missing or empty `embedding`
//! field — is an embedding failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Embedder;
use crate::error::{MemoryError, Result};

pub struct OllamaEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Option<Vec<f32>>,
}

impl OllamaEmbedder {
    pub fn new(base_url: String, model: String, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MemoryError::Embedding(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/embeddings", base_url.trim_end_matches('/')),
            model,
        })
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "embedding request failed");
                MemoryError::Embedding(format!("request to embedding service failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "embedding service returned non-success status");
            return Err(MemoryError::Embedding(format!(
                "embedding service returned HTTP {status}"
            )));
        }

        let body: EmbeddingResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "malformed embedding response");
            MemoryError::Embedding(format!("malformed embedding response: {e}"))
        })?;

        match body.embedding {
            Some(embedding) if !embedding.is_empty() => Ok(embedding),
            _ => {
                tracing::warn!("embedding response missing 'embedding' field");
                Err(MemoryError::Embedding(
                    "embedding response missing 'embedding' field".into(),
                ))
            }
        }
    }
}
