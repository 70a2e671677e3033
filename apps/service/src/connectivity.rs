use reqwest::StatusCode;
use tracing::info;

use crate::error::{Error, UnavailableCause};
use crate::proxy::ClientFactory;

/// Fetch `check_url` through the proxy and require a 200.
///
/// Run once before probing starts: probing over a broken proxy path would
/// expose the real network identity, so any failure here is fatal.
pub async fn verify_connectivity(clients: &dyn ClientFactory, check_url: &str) -> Result<(), Error> {
    let unavailable = |cause: UnavailableCause| Error::ProxyUnavailable { url: check_url.to_string(), cause };

    let client = clients.build().map_err(|e| unavailable(e.into()))?;
    let response = client.get(check_url).send().await.map_err(|e| unavailable(e.into()))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(unavailable(UnavailableCause::Status(status)));
    }

    info!(check_url, "Successfully connected through the proxy");
    Ok(())
}
