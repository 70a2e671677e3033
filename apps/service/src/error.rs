use reqwest::StatusCode;
use thiserror::Error;

/// Local failure while building a proxied HTTP client. No network I/O is
/// involved, so this never means the proxy itself is down.
#[derive(Debug, Error)]
pub enum ProxySetupError {
    #[error("invalid proxy address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("failed to build proxied HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why the startup connectivity check did not pass.
#[derive(Debug, Error)]
pub enum UnavailableCause {
    #[error(transparent)]
    Setup(#[from] ProxySetupError),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Failure to reach the target site. Turned into a `down` probe outcome
/// rather than propagated.
#[derive(Debug, Error)]
#[error("GET {url} failed: {source}")]
pub struct ProbeTransportError {
    pub url: String,
    #[source]
    pub source: reqwest::Error,
}

/// Failure to deliver a notification. Callers log it and move on.
#[derive(Debug, Error)]
pub enum NotifyDeliveryError {
    #[error("failed to serialize notification payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Setup(#[from] ProxySetupError),
    #[error("messaging API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("messaging API returned {0}")]
    Status(StatusCode),
}

/// Fatal startup errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("proxy unavailable: connectivity check against {url} failed")]
    ProxyUnavailable {
        url: String,
        #[source]
        cause: UnavailableCause,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
