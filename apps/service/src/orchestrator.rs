//! Orchestrator - wires the components together
//!
//! Startup order is fixed: the proxy path is verified once, and only then
//! does the scheduler start probing. A failed verification returns before
//! any probe or notification is attempted.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::connectivity::verify_connectivity;
use crate::error::Result;
use crate::monitoring::{ProbeResult, ProbeScheduler, SiteProber};
use crate::notify::{Notifier, TelegramNotifier};
use crate::proxy::{ClientFactory, Socks5ClientFactory};

/// Main orchestrator for the torwatch service
pub struct Orchestrator {
    config: Arc<Config>,
    clients: Arc<dyn ClientFactory>,
    prober: Arc<SiteProber>,
}

impl Orchestrator {
    /// Production wiring: SOCKS5 clients and the Telegram notifier.
    pub fn new(config: Arc<Config>) -> Self {
        let clients: Arc<dyn ClientFactory> =
            Arc::new(Socks5ClientFactory::new(config.proxy.address.clone(), config.request_timeout()));
        let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
            clients.clone(),
            config.telegram.endpoint.clone(),
            config.telegram.chat_id.clone(),
        ));

        Self::with_components(config, clients, notifier)
    }

    pub fn with_components(
        config: Arc<Config>,
        clients: Arc<dyn ClientFactory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let prober = Arc::new(SiteProber::new(
            clients.clone(),
            notifier,
            config.target.url.clone(),
            config.slow_threshold(),
        ));

        Self { config, clients, prober }
    }

    /// Startup connectivity check
    pub async fn verify(&self) -> Result<()> {
        verify_connectivity(self.clients.as_ref(), &self.config.proxy.check_url).await
    }

    /// Verify, then run a single probe and its notification.
    pub async fn probe_once(&self) -> Result<Option<ProbeResult>> {
        self.verify().await?;
        Ok(self.prober.run_once().await)
    }

    /// Verify, then probe on schedule until `shutdown` is cancelled.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        self.verify().await?;

        info!(
            target_url = %self.config.target.url,
            proxy = %self.config.proxy.address,
            "Starting probe loop"
        );

        ProbeScheduler::new(self.prober.clone(), self.config.poll_interval()).run(shutdown).await;
        Ok(())
    }
}
