//! Scheduled refresh
//!
//! Drives the aggregator on a fixed cadence plus one run shortly after
//! startup, so a disk-restored snapshot is replaced with fresh data quickly
//! without blocking the server from listening. The schedule is
//! unconditional: a failed run is logged and the next tick fires anyway.
//!
//! Both the cadence and the startup delay are injected rather than baked in,
//! so tests drive [`Scheduler::tick`] directly instead of waiting on the
//! wall clock.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::aggregator::Aggregator;

/// Recurring aggregation trigger
pub struct Scheduler {
    aggregator: Arc<Aggregator>,
    interval: Duration,
    startup_delay: Duration,
}

impl Scheduler {
    /// Create a scheduler over the given aggregator
    pub fn new(aggregator: Arc<Aggregator>, interval: Duration, startup_delay: Duration) -> Self {
        Self {
            aggregator,
            interval,
            startup_delay,
        }
    }

    /// Execute one scheduled run
    ///
    /// Failures are logged and swallowed; the schedule must keep firing
    /// regardless of individual run outcomes.
    pub async fn tick(&self) {
        match self.aggregator.run().await {
            Ok(snapshot) => {
                info!(count = snapshot.articles.len(), "Scheduled refresh complete");
            }
            Err(err) => {
                warn!(error = %err, "Scheduled refresh failed");
            }
        }
    }

    /// Spawn the recurring schedule as a background task
    ///
    /// Fire-and-forget: the task runs for the life of the process.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(self.startup_delay).await;
            self.tick().await;

            let mut ticker = tokio::time::interval(self.interval);
            // The first interval tick completes immediately; the startup run
            // above already covered it
            ticker.tick().await;

            loop {
                ticker.tick().await;
                self.tick().await;
            }
        })
    }
}
