//! Daily posting cadence and the daemon that drives it.

use crate::PostPipeline;
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::{task::JoinHandle, time::sleep};
use tracing::info;

/// A fixed local time of day at which a posting cycle fires.
#[derive(Debug, Clone)]
pub struct DailyCadence {
    tz: FixedOffset,
    target: NaiveTime,
}

impl DailyCadence {
    /// Create a cadence for a local time of day in a fixed-offset timezone.
    pub fn new(tz: FixedOffset, target: NaiveTime) -> Self {
        Self { tz, target }
    }

    /// The next UTC instant at which this cadence fires.
    ///
    /// A wake exactly at the target counts as already fired and schedules
    /// the next day, so a fast cycle cannot fire twice in one slot.
    pub fn next_run_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let localized_now = now.with_timezone(&self.tz);
        let mut date = localized_now.date_naive();
        if localized_now.time() >= self.target {
            date = advance_day(date);
        }

        let local_target = date.and_time(self.target);

        match self.tz.from_local_datetime(&local_target) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(first, _) => first.with_timezone(&Utc),
            LocalResult::None => unreachable!("fixed offset should not produce nonexistent times"),
        }
    }
}

fn advance_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt()
        .expect("date should remain representable when advancing")
}

/// Daemon that runs posting cycles at the configured local times.
///
/// All cycles run sequentially on this one task, so the usage store's
/// load-modify-save sequence is never executed concurrently in-process.
pub struct PostDaemon {
    pipeline: Arc<PostPipeline>,
    cadences: Vec<DailyCadence>,
    tz: FixedOffset,
}

impl PostDaemon {
    /// Create a daemon for a set of local post times.
    pub fn new(pipeline: Arc<PostPipeline>, tz: FixedOffset, times: &[NaiveTime]) -> Self {
        let cadences = times
            .iter()
            .map(|time| DailyCadence::new(tz, *time))
            .collect();
        Self {
            pipeline,
            cadences,
            tz,
        }
    }

    /// Spawn the daemon onto the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(self) {
        if self.cadences.is_empty() {
            info!("No scheduled post times configured, daemon exiting");
            return;
        }

        loop {
            let now = Utc::now();
            let next = self
                .cadences
                .iter()
                .map(|cadence| cadence.next_run_from(now))
                .min()
                .expect("at least one cadence");
            let wait = duration_until(next, now);
            let next_local = next.with_timezone(&self.tz);
            info!(
                next_run_utc = %next.to_rfc3339(),
                next_run_local = %next_local.to_rfc3339(),
                wait_seconds = wait.as_secs(),
                "Scheduled next posting cycle"
            );
            sleep(wait).await;

            self.pipeline.run_cycle().await;
        }
    }
}

fn duration_until(next: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    match (next - now).to_std() {
        Ok(duration) => duration,
        Err(_) => Duration::from_secs(0),
    }
}
