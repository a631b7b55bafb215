//! Core memory engine: memorize (write path) and recall (read path).
//!
//! Both paths are pure orchestration over the injected [`Embedder`] and
//! [`VectorStore`] seams, so correctness is testable with in-memory fakes.
//!
//! [`Embedder`]: crate::embedding::Embedder
//! [`VectorStore`]: crate::store::VectorStore

pub mod memorize;
pub mod recall;

use std::fmt;

/// Human-readable classification of a query distance. Derived per query,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RelevanceBand {
    Highly,
    Somewhat,
    Slightly,
    NotVery,
}

/// Band thresholds, ascending, on the store's distance scale (cosine
/// distance for the Chroma client). The bands are half-open: a distance
/// exactly at a threshold falls into the less relevant band.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceThresholds {
    pub highly: f64,
    pub somewhat: f64,
    pub slightly: f64,
}

impl RelevanceBand {
    pub fn classify(distance: f64, thresholds: &RelevanceThresholds) -> Self {
        if distance < thresholds.highly {
            RelevanceBand::Highly
        } else if distance < thresholds.somewhat {
            RelevanceBand::Somewhat
        } else if distance < thresholds.slightly {
            RelevanceBand::Slightly
        } else {
            RelevanceBand::NotVery
        }
    }
}

impl fmt::Display for RelevanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RelevanceBand::Highly => "Highly relevant",
            RelevanceBand::Somewhat => "Somewhat relevant",
            RelevanceBand::Slightly => "Slightly relevant",
            RelevanceBand::NotVery => "Not very relevant",
        };
        f.write_str(label)
    }
}

impl From<&crate::config::RetrievalConfig> for RelevanceThresholds {
    fn from(config: &crate::config::RetrievalConfig) -> Self {
        Self {
            highly: config.highly,
            somewhat: config.somewhat,
            slightly: config.slightly,
        }
    }
}
