mod helpers;

use helpers::{FailingEmbedder, FailingStore, FakeEmbedder, InMemoryStore};
use mnemo::embedding::Embedder;
use mnemo::error::MemoryError;
use mnemo::memory::memorize::memorize;
use mnemo::store::VectorStore;
use std::collections::HashSet;
use std::sync::Arc;

fn fakes() -> (Arc<dyn Embedder>, Arc<InMemoryStore>) {
    (Arc::new(FakeEmbedder), Arc::new(InMemoryStore::default()))
}

#[tokio::test]
async fn memorize_single_text_persists_one_record() {
    let (embedder, store) = fakes();
    let store_dyn: Arc<dyn VectorStore> = store.clone();

    let receipt = memorize(
        &embedder,
        &store_dyn,
        &["Rust is a systems language".to_string()],
        None,
    )
    .await
    .unwrap();

    assert_eq!(receipt.count, 1);
    assert_eq!(receipt.ids.len(), 1);
    assert_eq!(store.len(), 1);

    let records = store.records.lock().unwrap();
    assert_eq!(records[0].text, "Rust is a systems language");
    assert_eq!(records[0].id, receipt.ids[0]);
    // Default metadata applies when the caller provides none
    assert_eq!(records[0].metadata["topic"], "memory");
}

#[tokio::test]
async fn memorize_batch_assigns_fresh_unique_ids() {
    let (embedder, store) = fakes();
    let store_dyn: Arc<dyn VectorStore> = store.clone();
    let texts: Vec<String> = (0..10).map(|i| format!("fact number {i}")).collect();

    let receipt = memorize(&embedder, &store_dyn, &texts, None).await.unwrap();

    assert_eq!(receipt.count, 10);
    assert_eq!(store.len(), 10);
    let unique: HashSet<&String> = receipt.ids.iter().collect();
    assert_eq!(unique.len(), 10);

    // Memorizing the same texts again stores new items under new ids
    let receipt2 = memorize(&embedder, &store_dyn, &texts, None).await.unwrap();
    assert_eq!(store.len(), 20);
    for id in &receipt2.ids {
        assert!(!receipt.ids.contains(id));
    }
}

#[tokio::test]
async fn memorize_batch_replicates_metadata_per_item() {
    let (embedder, store) = fakes();
    let store_dyn: Arc<dyn VectorStore> = store.clone();
    let metadata = serde_json::json!({ "topic": "papers", "source": "arxiv" });

    memorize(
        &embedder,
        &store_dyn,
        &["chunk one".to_string(), "chunk two".to_string()],
        Some(metadata.clone()),
    )
    .await
    .unwrap();

    let records = store.records.lock().unwrap();
    assert_eq!(records.len(), 2);
    for record in records.iter() {
        assert_eq!(record.metadata, metadata);
    }
}

#[tokio::test]
async fn embedding_failure_aborts_whole_batch() {
    let embedder: Arc<dyn Embedder> = Arc::new(FailingEmbedder {
        fail_marker: "!poison".into(),
    });
    let store = Arc::new(InMemoryStore::default());
    let store_dyn: Arc<dyn VectorStore> = store.clone();

    // Second text fails; the first already embedded fine — still nothing lands.
    let texts = vec![
        "embeds fine".to_string(),
        "this one !poison fails".to_string(),
        "never reached".to_string(),
    ];
    let result = memorize(&embedder, &store_dyn, &texts, None).await;

    assert!(matches!(result, Err(MemoryError::Embedding(_))));
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn store_failure_surfaces_verbatim() {
    let embedder: Arc<dyn Embedder> = Arc::new(FakeEmbedder);
    let store: Arc<dyn VectorStore> = Arc::new(FailingStore);

    let result = memorize(&embedder, &store, &["text".to_string()], None).await;

    match result {
        Err(MemoryError::Store(detail)) => assert!(detail.contains("simulated store outage")),
        other => panic!("expected store error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_batch_is_a_successful_no_op() {
    let (embedder, store) = fakes();
    let store_dyn: Arc<dyn VectorStore> = store.clone();

    let receipt = memorize(&embedder, &store_dyn, &[], None).await.unwrap();
    assert_eq!(receipt.count, 0);
    assert_eq!(store.len(), 0);
}
