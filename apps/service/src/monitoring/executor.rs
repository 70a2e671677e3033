use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use super::checker::HttpChecker;
use super::types::{ProbeResult, format_millis};
use crate::error::ProxySetupError;
use crate::notify::Notifier;
use crate::proxy::ClientFactory;

/// Site prober - runs one probe of the target and reports the outcome
pub struct SiteProber {
    clients: Arc<dyn ClientFactory>,
    notifier: Arc<dyn Notifier>,
    target: String,
    slow_threshold: Duration,
}

impl SiteProber {
    pub fn new(
        clients: Arc<dyn ClientFactory>,
        notifier: Arc<dyn Notifier>,
        target: impl Into<String>,
        slow_threshold: Duration,
    ) -> Self {
        Self { clients, notifier, target: target.into(), slow_threshold }
    }

    /// Probe the target with a freshly built client and classify the outcome.
    pub async fn probe(&self) -> Result<ProbeResult, ProxySetupError> {
        let checker = HttpChecker::new(self.clients.build()?);

        let result = match checker.check(&self.target).await {
            Ok((latency, status_code)) => ProbeResult::completed(
                self.target.clone(),
                latency,
                Some(status_code),
                self.slow_threshold,
            ),
            Err(e) => ProbeResult::unreachable(self.target.clone(), e.to_string()),
        };

        Ok(result)
    }

    /// One full iteration: probe, then send exactly one notification.
    ///
    /// Returns `None` when no client could be built; the iteration is then
    /// abandoned without notifying.
    pub async fn run_once(&self) -> Option<ProbeResult> {
        let result = match self.probe().await {
            Ok(result) => result,
            Err(e) => {
                error!(target_url = %self.target, error = %e, "Failed to create proxied client, skipping probe");
                return None;
            }
        };

        let message = result.message();

        // Delivery failures stay here: a lost notification must never stop
        // the next probe.
        if let Err(e) = self.notifier.notify(&message).await {
            warn!(error = %e, "Failed to deliver notification");
        }

        match result.latency {
            Some(latency) => info!(
                target_url = %result.target,
                status = %result.status,
                status_code = ?result.status_code,
                "Site status: {} - Response time: {} ms",
                result.target,
                format_millis(latency)
            ),
            None => warn!(
                target_url = %result.target,
                status = %result.status,
                error = result.error_message.as_deref().unwrap_or_default(),
                "{message}"
            ),
        }

        Some(result)
    }
}
