use std::time::Duration;

use thiserror::Error;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{
    fetcher::{FetchError, Fetcher},
    ingest::{ingest, IngestionError},
    parser,
    types::{CycleReport, InFlight},
};
use crate::{
    db::DbPool,
    models::feed::{DueFeed, Feed},
};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
}

enum FeedOutcome {
    Ingested(usize),
    AlreadyInFlight,
}

/// Runs ingestion cycles against the shared pool. Cheap to clone: the timer
/// task and the force-refresh handler each hold a copy.
#[derive(Clone)]
pub struct FeedMonitor {
    pool: DbPool,
    fetcher: Fetcher,
    in_flight: InFlight,
}

impl FeedMonitor {
    pub fn new(pool: DbPool, fetcher: Fetcher) -> Self {
        Self {
            pool,
            fetcher,
            in_flight: InFlight::new(),
        }
    }

    pub async fn run_scheduled_cycle(&self) -> CycleReport {
        self.run_cycle(false).await
    }

    pub async fn run_forced_cycle(&self) -> CycleReport {
        self.run_cycle(true).await
    }

    async fn run_cycle(&self, force: bool) -> CycleReport {
        let mut report = CycleReport {
            forced: force,
            ..Default::default()
        };

        let due = match self.select_due(force) {
            Ok(due) => due,
            Err(e) => {
                tracing::error!(force, error = %e, "Could not select due feeds");
                return report;
            }
        };
        report.due = due.len();
        tracing::info!(force, due = report.due, "Processing feeds");

        for feed in &due {
            match self.process_feed(feed).await {
                Ok(FeedOutcome::Ingested(count)) => {
                    report.ingested += 1;
                    report.items += count;
                }
                Ok(FeedOutcome::AlreadyInFlight) => {
                    tracing::info!(feed_url = %feed.url, "Feed is already being ingested, skipping");
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(feed_id = %feed.id, feed_url = %feed.url, error = %e, "Feed update failed");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            force,
            due = report.due,
            ingested = report.ingested,
            skipped = report.skipped,
            failed = report.failed,
            items = report.items,
            "Finished processing feeds"
        );
        report
    }

    fn select_due(&self, force: bool) -> Result<Vec<DueFeed>, IngestionError> {
        let mut conn = self.pool.get()?;
        let now = chrono::Utc::now().timestamp();
        Ok(Feed::select_due(&mut conn, force, now)?)
    }

    async fn process_feed(&self, feed: &DueFeed) -> Result<FeedOutcome, FeedError> {
        let Some(_claim) = self.in_flight.try_claim(feed.id) else {
            return Ok(FeedOutcome::AlreadyInFlight);
        };

        tracing::info!(feed_url = %feed.url, "Getting update from feed");
        let raw = self.fetcher.fetch(&feed.url).await?;
        let items = parser::parse(&raw);

        let mut conn = self.pool.get().map_err(IngestionError::from)?;
        let now = chrono::Utc::now().timestamp();
        match ingest(&mut conn, feed.id, &items, now) {
            Ok(count) => {
                tracing::info!(feed_url = %feed.url, items = count, "Committed transaction for feed");
                Ok(FeedOutcome::Ingested(count))
            }
            Err(e) => {
                tracing::warn!(feed_url = %feed.url, "Rolled back transaction for feed");
                Err(e.into())
            }
        }
    }
}

/// Runs a scheduled cycle every `interval` for the life of the process. The
/// first cycle happens one interval after startup.
pub async fn start(monitor: FeedMonitor, interval: Duration) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        monitor.run_scheduled_cycle().await;
    }
}
