//! Read path — embed the query, fetch nearest neighbors, band and render.

use std::sync::Arc;

use crate::embedding::Embedder;
use crate::error::Result;
use crate::memory::{RelevanceBand, RelevanceThresholds};
use crate::store::VectorStore;

/// One scored result, ready for rendering.
#[derive(Debug, Clone)]
pub struct ScoredHit {
    /// 1-based rank, ascending by distance.
    pub rank: usize,
    pub text: String,
    pub band: RelevanceBand,
    pub distance: f64,
}

/// Outcome of a recall. Zero matches is a successful outcome, not an error.
#[derive(Debug)]
pub enum RecallReport {
    Matches(Vec<ScoredHit>),
    NoMatches,
}

impl RecallReport {
    /// Render the report the way it is returned to the agent: one block per
    /// result (rank, text, relevance label, distance to 4 decimal places),
    /// blocks separated by a blank line.
    pub fn render(&self) -> String {
        match self {
            RecallReport::NoMatches => "No similar texts found.".to_string(),
            RecallReport::Matches(hits) => hits
                .iter()
                .map(|hit| {
                    format!(
                        "Result {}: {}\nRelevance: {}\nDistance: {:.4}\n",
                        hit.rank, hit.text, hit.band, hit.distance
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Retrieve the `k` stored texts most similar in meaning to `query_text`.
///
/// Hits keep the store's order (ascending distance); banding is recomputed
/// per query from the configured thresholds.
pub async fn recall(
    embedder: &Arc<dyn Embedder>,
    store: &Arc<dyn VectorStore>,
    query_text: &str,
    k: usize,
    thresholds: &RelevanceThresholds,
) -> Result<RecallReport> {
    let embedding = embedder.embed(query_text).await?;

    store.ensure_collection().await?;
    let hits = store.query(&embedding, k).await?;

    if hits.is_empty() {
        return Ok(RecallReport::NoMatches);
    }

    let scored = hits
        .into_iter()
        .enumerate()
        .map(|(i, hit)| ScoredHit {
            rank: i + 1,
            band: RelevanceBand::classify(hit.distance, thresholds),
            text: hit.text,
            distance: hit.distance,
        })
        .collect();

    tracing::info!(query_len = query_text.len(), "recall completed");
    Ok(RecallReport::Matches(scored))
}
