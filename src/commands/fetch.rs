use anyhow::Result;
use std::sync::Arc;

use khabar::aggregator::Aggregator;
use khabar::config::Config;
use khabar::store::SnapshotStore;

/// Run one aggregation pass and print the resulting snapshot
pub async fn fetch(config: Config) -> Result<()> {
    println!("Running one aggregation pass");
    println!("============================");

    let store = Arc::new(SnapshotStore::new(config.storage.snapshot_path.clone()));
    let aggregator = Aggregator::from_config(&config, store)?;

    let snapshot = aggregator.run().await?;

    println!(
        "\nFetched {} articles (updated {})\n",
        snapshot.articles.len(),
        snapshot.last_updated.as_deref().unwrap_or("-")
    );
    for article in &snapshot.articles {
        println!(
            "  {:>2}. [{:<13}] {} ({})",
            article.id,
            article.category.as_str(),
            article.title,
            article.source
        );
    }

    Ok(())
}
