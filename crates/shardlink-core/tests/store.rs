use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use shardlink_backend::{in_memory_pool, InMemoryBackend};
use shardlink_core::router::shard_index;
use shardlink_core::{Pool, ShardBackend, ShortCode, ShortlinkStore, StoreError};
use shardlink_generator::{RandomGenerator, SeqGenerator};

fn random_store(shards: usize) -> ShortlinkStore<InMemoryBackend, RandomGenerator> {
    ShortlinkStore::with_defaults(in_memory_pool(shards).unwrap(), RandomGenerator::default())
}

#[tokio::test]
async fn create_then_resolve_round_trip() {
    let store = random_store(3);

    let id = store.create("https://example.com", None).await.unwrap();
    assert_eq!(id.as_str().len(), 8);

    let url = store.resolve(&id).await.unwrap();
    assert_eq!(url.as_deref(), Some("https://example.com"));
}

#[tokio::test]
async fn url_is_returned_unchanged() {
    let store = random_store(3);
    let original = "https://example.com/a%20b?q=1&r=%E2%9C%93#frag";

    let id = store.create(original, None).await.unwrap();
    assert_eq!(store.resolve(&id).await.unwrap().as_deref(), Some(original));
}

#[tokio::test]
async fn unknown_identifier_is_not_found() {
    let store = random_store(3);
    let url = store
        .resolve(&ShortCode::new("doesnotexist").unwrap())
        .await
        .unwrap();
    assert!(url.is_none());
}

#[tokio::test]
async fn record_expires_after_ttl() {
    let store = random_store(3);

    let id = store
        .create("https://example.com", Some(Duration::from_secs(1)))
        .await
        .unwrap();
    assert!(store.resolve(&id).await.unwrap().is_some());

    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(store.resolve(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn record_lives_only_on_its_owning_shard() {
    let store = random_store(3);

    for _ in 0..50 {
        let id = store.create("https://example.com", None).await.unwrap();
        let owner = shard_index(id.as_str(), 3).unwrap();

        for (index, shard) in store.pool().shards().iter().enumerate() {
            let hit = shard.get(&id).await.unwrap().is_some();
            assert_eq!(hit, index == owner, "id {id} on shard {index}");
        }
    }
}

#[tokio::test]
async fn resizing_the_pool_strands_existing_records() {
    let backends: Vec<Arc<InMemoryBackend>> =
        (0..4).map(|_| Arc::new(InMemoryBackend::new())).collect();
    let three = ShortlinkStore::with_defaults(
        Pool::new(backends[..3].to_vec()).unwrap(),
        RandomGenerator::default(),
    );
    let four = ShortlinkStore::with_defaults(Pool::new(backends).unwrap(), RandomGenerator::default());

    let mut stranded = 0;
    for _ in 0..30 {
        let id = three.create("https://example.com", None).await.unwrap();
        let moved = shard_index(id.as_str(), 3).unwrap() != shard_index(id.as_str(), 4).unwrap();
        let found = four.resolve(&id).await.unwrap().is_some();
        assert_eq!(found, !moved, "id {id}");
        if moved {
            stranded += 1;
        }
    }
    assert!(stranded > 0);
}

#[tokio::test]
async fn every_shard_receives_generated_identifiers() {
    for shards in [1, 2, 3, 7] {
        let store = random_store(shards);
        for _ in 0..500 {
            store.create("https://example.com", None).await.unwrap();
        }
        for (index, shard) in store.pool().shards().iter().enumerate() {
            assert!(!shard.is_empty(), "shards={shards}: shard {index} got no keys");
        }
    }
}

#[tokio::test]
async fn sequential_identifiers_also_reach_every_shard() {
    let store = ShortlinkStore::with_defaults(in_memory_pool(3).unwrap(), SeqGenerator::with_prefix("sl"));
    for _ in 0..30 {
        store.create("https://example.com", None).await.unwrap();
    }
    assert!(store.pool().shards().iter().all(|s| !s.is_empty()));
}

#[tokio::test]
async fn empty_url_is_rejected() {
    let store = random_store(3);
    let err = store.create("", None).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn concurrent_creates_and_resolves() {
    let store = random_store(3);
    let mut handles = Vec::new();

    for i in 0..50 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let url = format!("https://example{i}.com");
            let id = store.create(&url, None).await.unwrap();
            let resolved = store.resolve(&id).await.unwrap();
            assert_eq!(resolved.as_deref(), Some(url.as_str()));
            id
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }
    assert_eq!(ids.len(), 50);
}
