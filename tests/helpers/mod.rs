#![allow(dead_code)]

use async_trait::async_trait;
use mnemo::embedding::Embedder;
use mnemo::error::{MemoryError, Result};
use mnemo::ingest::PageSource;
use mnemo::store::{MemoryRecord, QueryHit, VectorStore};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const DIM: usize = 8;

/// Deterministic fake embedder: the same text always maps to the same
/// L2-normalized vector, and distinct texts almost always map to distinct
/// vectors. Good enough to exercise round trips without a model.
pub struct FakeEmbedder;

fn hash_component(text: &str, i: usize) -> f32 {
    let mut hasher = DefaultHasher::new();
    (text, i).hash(&mut hasher);
    (hasher.finish() % 1000) as f32 / 1000.0 + 0.001
}

pub fn fake_embedding(text: &str) -> Vec<f32> {
    let mut v: Vec<f32> = (0..DIM).map(|i| hash_component(text, i)).collect();
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    for x in &mut v {
        *x /= norm;
    }
    v
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(fake_embedding(text))
    }
}

/// Embedder that fails for any text containing the configured marker.
pub struct FailingEmbedder {
    pub fail_marker: String,
}

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.contains(&self.fail_marker) {
            Err(MemoryError::Embedding("simulated embedding outage".into()))
        } else {
            Ok(fake_embedding(text))
        }
    }
}

/// In-memory vector store with cosine distance, matching the space the real
/// Chroma collection is created with.
#[derive(Default)]
pub struct InMemoryStore {
    pub records: Mutex<Vec<MemoryRecord>>,
}

impl InMemoryStore {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    // Clamp: rounding can push the ratio a hair past 1.0 for identical vectors
    ((1.0 - dot / (norm_a * norm_b)) as f64).max(0.0)
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn ensure_collection(&self) -> Result<()> {
        Ok(())
    }

    async fn add(&self, records: &[MemoryRecord]) -> Result<()> {
        self.records.lock().unwrap().extend_from_slice(records);
        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<QueryHit>> {
        let records = self.records.lock().unwrap();
        let mut hits: Vec<QueryHit> = records
            .iter()
            .map(|r| QueryHit {
                text: r.text.clone(),
                distance: cosine_distance(embedding, &r.embedding),
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);
        Ok(hits)
    }
}

/// Store whose add always fails, for surfacing-store-errors tests.
pub struct FailingStore;

#[async_trait]
impl VectorStore for FailingStore {
    async fn ensure_collection(&self) -> Result<()> {
        Ok(())
    }

    async fn add(&self, _records: &[MemoryRecord]) -> Result<()> {
        Err(MemoryError::Store("simulated store outage".into()))
    }

    async fn query(&self, _embedding: &[f32], _k: usize) -> Result<Vec<QueryHit>> {
        Err(MemoryError::Store("simulated store outage".into()))
    }
}

/// Fake page source backed by an in-memory list of page texts. Counts calls
/// so tests can assert the document was never opened.
pub struct FakePageSource {
    pub pages: Vec<String>,
    pub calls: AtomicUsize,
}

impl FakePageSource {
    pub fn new(pages: Vec<String>) -> Self {
        Self {
            pages,
            calls: AtomicUsize::new(0),
        }
    }

    /// A document with `n` single-marker pages ("p0", "p1", ...).
    pub fn with_page_count(n: usize) -> Self {
        Self::new((0..n).map(|i| format!("p{i}")).collect())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PageSource for FakePageSource {
    fn page_count(&self, _path: &Path) -> Result<usize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.len())
    }

    fn extract_pages(&self, _path: &Path, range: Range<usize>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages[range].concat())
    }
}
