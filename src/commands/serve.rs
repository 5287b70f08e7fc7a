use anyhow::{Context, Result};
use std::sync::Arc;

use khabar::aggregator::Aggregator;
use khabar::config::Config;
use khabar::scheduler::Scheduler;
use khabar::server::{self, AppState};
use khabar::store::SnapshotStore;

/// Run the aggregation service: restore the persisted snapshot, start the
/// refresh schedule and serve the query API until shutdown.
pub async fn serve(config: Config) -> Result<()> {
    println!("Starting khabar news service");
    println!("============================");
    println!("  Listen: {}:{}", config.server.host, config.server.port);
    println!(
        "  Keyed API: {}",
        if config.keyed_api_enabled() {
            "enabled"
        } else {
            "disabled (feeds only)"
        }
    );
    println!("  Snapshot: {}", config.storage.snapshot_path.display());
    println!(
        "  Refresh: every {}s, first run after {}s",
        config.scheduler.refresh_interval_secs, config.scheduler.startup_delay_secs
    );
    println!();

    let store = Arc::new(SnapshotStore::new(config.storage.snapshot_path.clone()));

    // Pre-populate from the persisted record so the API has something to
    // serve before the first live run lands
    match store.restore().await {
        Ok(true) => {}
        Ok(false) => tracing::info!("No persisted snapshot; starting empty"),
        Err(err) => tracing::warn!(error = %err, "Could not restore persisted snapshot"),
    }

    let aggregator = Arc::new(
        Aggregator::from_config(&config, store.clone())
            .context("Failed to build aggregation pipeline")?,
    );

    Scheduler::new(
        aggregator.clone(),
        config.refresh_interval(),
        config.startup_delay(),
    )
    .spawn();

    server::serve(&config.server, AppState::new(store, aggregator))
        .await
        .context("Query service failed")?;

    Ok(())
}
