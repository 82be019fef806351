use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{Clock, ConversationStore};

const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Periodically evicts idle conversations from a [`ConversationStore`].
pub struct ConversationSweeper {
    store: Arc<dyn ConversationStore>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    interval: Duration,
}

impl ConversationSweeper {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            interval: interval.max(MIN_SWEEP_INTERVAL),
        }
    }

    pub fn sweep_once(&self) {
        let before = self.store.len();
        self.store.sweep(self.clock.now(), self.ttl);
        let remaining = self.store.len();
        tracing::debug!(
            removed = before.saturating_sub(remaining),
            remaining,
            "Conversation sweep finished"
        );
    }

    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            tracing::info!(
                interval_secs = self.interval.as_secs(),
                ttl_minutes = self.ttl.num_minutes(),
                "Conversation sweeper started"
            );
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => self.sweep_once(),
                }
            }
            tracing::info!("Conversation sweeper stopped");
        })
    }
}
