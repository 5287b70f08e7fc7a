//! End-to-end pipeline properties

mod common;

use common::{create_test_article, create_test_snapshot, create_test_store, DeadSource, FixedSource};
use khabar::aggregator::{Aggregator, MAX_ARTICLES};
use khabar::error::Error;
use khabar::models::Category;
use khabar::sources::NewsSource;
use khabar::store::SnapshotStore;
use std::sync::Arc;

#[tokio::test]
async fn test_snapshot_invariants_hold_after_a_run() {
    let (store, _) = create_test_store();

    // 20 articles with a duplicated title early on
    let mut articles: Vec<_> = (0..20)
        .map(|i| create_test_article(i + 1, &format!("headline {i}"), Category::General))
        .collect();
    articles[3].title = "headline 0".to_string();

    let aggregator = Aggregator::new(None, Box::new(FixedSource(articles)), store.clone());
    let snapshot = aggregator.run().await.unwrap();

    assert!(snapshot.articles.len() <= MAX_ARTICLES);

    let mut titles: Vec<&str> = snapshot.articles.iter().map(|a| a.title.as_str()).collect();
    titles.sort_unstable();
    titles.dedup();
    assert_eq!(titles.len(), snapshot.articles.len());

    let ids: Vec<u32> = snapshot.articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, (1..=snapshot.articles.len() as u32).collect::<Vec<_>>());

    assert!(snapshot
        .articles
        .iter()
        .all(|a| Category::all().contains(&a.category)));
}

#[tokio::test]
async fn test_restart_with_persisted_record_and_dead_sources() {
    let (store, path) = create_test_store();

    // A previous process persisted a good snapshot
    let persisted = create_test_snapshot(vec![
        create_test_article(1, "Budget session wraps up", Category::Polity),
        create_test_article(2, "Satellite in orbit", Category::Science),
    ]);
    store.persist_to_disk(&persisted).unwrap();

    // "Restart": new store on the same path, every source dead
    let store = Arc::new(SnapshotStore::new(path));
    assert!(store.restore().await.unwrap());

    let aggregator = Aggregator::new(
        Some(Box::new(DeadSource) as Box<dyn NewsSource>),
        Box::new(DeadSource),
        store.clone(),
    );
    assert!(matches!(aggregator.run().await, Err(Error::NoArticles)));

    // The restored snapshot is still served
    let current = store.get().await;
    assert_eq!(current.articles.len(), 2);
    assert_eq!(current.articles[0].title, "Budget session wraps up");
    assert_eq!(
        current.last_updated.as_deref(),
        Some("2026-08-28T09:00:00Z")
    );
}

#[tokio::test]
async fn test_successful_run_overwrites_persisted_record_wholesale() {
    let (store, _) = create_test_store();

    store
        .persist_to_disk(&create_test_snapshot(vec![create_test_article(
            1,
            "stale headline",
            Category::General,
        )]))
        .unwrap();
    store.restore().await.unwrap();

    let fresh = vec![
        create_test_article(1, "fresh headline one", Category::Economy),
        create_test_article(2, "fresh headline two", Category::Sports),
    ];
    let aggregator = Aggregator::new(None, Box::new(FixedSource(fresh)), store.clone());
    aggregator.run().await.unwrap();

    // Disk record was replaced, not merged
    let on_disk = store.load_from_disk().unwrap().unwrap();
    assert_eq!(on_disk.articles.len(), 2);
    assert!(on_disk.articles.iter().all(|a| a.title.starts_with("fresh")));
    assert!(!on_disk.is_fallback);
}
