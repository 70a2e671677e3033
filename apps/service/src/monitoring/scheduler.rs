use std::sync::Arc;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::executor::SiteProber;

/// Probe scheduler - drives the prober on a fixed period
pub struct ProbeScheduler {
    prober: Arc<SiteProber>,
    period: Duration,
}

impl ProbeScheduler {
    /// `period` must be non-zero.
    pub fn new(prober: Arc<SiteProber>, period: Duration) -> Self {
        Self { prober, period }
    }

    /// Probe immediately, then once per period until `shutdown` is cancelled.
    ///
    /// Iterations never overlap. Ticks missed while an iteration overran are
    /// dropped rather than fired back to back. Returns the number of
    /// iterations that ran to completion.
    pub async fn run(&self, shutdown: CancellationToken) -> u64 {
        let mut timer = interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(period_secs = self.period.as_secs_f64(), "Probe scheduler started");

        let mut completed = 0;
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = timer.tick() => {}
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!("Shutdown requested, abandoning in-flight probe");
                    break;
                }
                _ = self.prober.run_once() => completed += 1,
            }
        }

        info!(iterations = completed, "Probe scheduler stopped");
        completed
    }

    /// Run the scheduler on its own task
    pub fn spawn(self, shutdown: CancellationToken) -> tokio::task::JoinHandle<u64> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}
