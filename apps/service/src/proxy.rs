//! Builds HTTP clients that tunnel every connection through a SOCKS5 proxy.

use std::time::Duration;

use reqwest::Client;

use crate::error::ProxySetupError;

/// Produces a fresh HTTP client for each outbound operation.
pub trait ClientFactory: Send + Sync {
    fn build(&self) -> Result<Client, ProxySetupError>;
}

/// Client factory dialing through a SOCKS5 endpoint.
#[derive(Debug, Clone)]
pub struct Socks5ClientFactory {
    address: String,
    timeout: Duration,
}

impl Socks5ClientFactory {
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self { address: address.into(), timeout }
    }
}

impl ClientFactory for Socks5ClientFactory {
    fn build(&self) -> Result<Client, ProxySetupError> {
        let proxy_url = socks5_url(&self.address)?;
        let proxy = reqwest::Proxy::all(proxy_url.as_str()).map_err(ProxySetupError::Client)?;

        Ok(Client::builder().proxy(proxy).timeout(self.timeout).build()?)
    }
}

/// Turn a `host:port` (or `socks5://host:port`) address into a `socks5h`
/// URL so host names are resolved by the proxy, not locally.
pub fn socks5_url(address: &str) -> Result<String, ProxySetupError> {
    let invalid = |reason: &str| ProxySetupError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = address.trim();
    let host_port = match trimmed.split_once("://") {
        Some(("socks5" | "socks5h", rest)) => rest,
        Some((scheme, _)) => return Err(invalid(&format!("unsupported scheme `{scheme}`"))),
        None => trimmed,
    };

    let (host, port) = host_port.rsplit_once(':').ok_or_else(|| invalid("expected host:port"))?;
    if host.is_empty() {
        return Err(invalid("missing host"));
    }
    let port: u16 = port.parse().map_err(|_| invalid("port is not a number in 0-65535"))?;
    if port == 0 {
        return Err(invalid("port must not be 0"));
    }

    Ok(format!("socks5h://{host}:{port}"))
}
