use std::time::{Duration, SystemTime};

/// Status of a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// Response arrived within the slow threshold
    Up,
    /// Response arrived, but slower than the threshold
    Slow,
    /// No response: transport error or timeout
    Down,
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeStatus::Up => write!(f, "up"),
            ProbeStatus::Slow => write!(f, "slow"),
            ProbeStatus::Down => write!(f, "down"),
        }
    }
}

/// Classify a completed request by its elapsed time.
pub fn classify(elapsed: Duration, slow_threshold: Duration) -> ProbeStatus {
    if elapsed > slow_threshold { ProbeStatus::Slow } else { ProbeStatus::Up }
}

/// Milliseconds with two decimals, e.g. `250.00`.
pub fn format_millis(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64() * 1000.0)
}

/// Result of a single probe
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// URL that was probed
    pub target: String,

    /// Timestamp when the probe was started
    pub timestamp: SystemTime,

    pub status: ProbeStatus,

    /// Wall-clock time until the response arrived
    pub latency: Option<Duration>,

    /// HTTP status code, recorded for the logs only
    pub status_code: Option<u16>,

    /// Error message (if the probe failed)
    pub error_message: Option<String>,
}

impl ProbeResult {
    fn new(target: String, status: ProbeStatus) -> Self {
        Self {
            target,
            timestamp: SystemTime::now(),
            status,
            latency: None,
            status_code: None,
            error_message: None,
        }
    }

    /// A completed request, classified against `slow_threshold`
    pub fn completed(
        target: String,
        latency: Duration,
        status_code: Option<u16>,
        slow_threshold: Duration,
    ) -> Self {
        let mut result = Self::new(target, classify(latency, slow_threshold));
        result.latency = Some(latency);
        result.status_code = status_code;
        result
    }

    /// A request that never completed
    pub fn unreachable(target: String, error: String) -> Self {
        let mut result = Self::new(target, ProbeStatus::Down);
        result.error_message = Some(error);
        result
    }

    /// Human-readable notification text for this outcome.
    pub fn message(&self) -> String {
        let latency = self.latency.map(format_millis).unwrap_or_default();
        match self.status {
            ProbeStatus::Down => format!("Site down: {}", self.target),
            ProbeStatus::Slow => {
                format!("Warning: Site {} is slow. Response time: {} ms", self.target, latency)
            }
            ProbeStatus::Up => format!("Site {} is up. Response time: {} ms", self.target, latency),
        }
    }
}
