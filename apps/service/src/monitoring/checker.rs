use std::time::{Duration, Instant};

use reqwest::Client;

use crate::error::ProbeTransportError;

/// Timed HTTP GET over an already configured client
pub struct HttpChecker {
    client: Client,
}

impl HttpChecker {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// GET `target` and return the elapsed time together with the status
    /// code. Any completed response counts, whatever its status.
    pub async fn check(&self, target: &str) -> Result<(Duration, u16), ProbeTransportError> {
        let start = Instant::now();

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|source| ProbeTransportError { url: target.to_string(), source })?;

        let latency = start.elapsed();
        Ok((latency, response.status().as_u16()))
    }
}
