//! HTTP retrieval of provider metadata.

use reqwest::Client;
use std::error::Error;
use std::time::Duration;

/// GitHub rejects API requests without a user agent.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client.
pub fn build_client(timeout: Duration) -> Result<Client, Box<dyn Error>> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Error building HTTP client: {e}"))?;
    Ok(client)
}

/// GET `url` and return the body.
///
/// # Returns
/// * `Ok(String)` - The non-empty response body
/// * `Err` - On transport failure, non-success status, or an empty body
pub async fn get_data(client: &Client, url: &str) -> Result<String, Box<dyn Error>> {
    log::info!("Getting data from {url}");

    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("Error fetching {url}: {e}"))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(format!("Error fetching {url}: HTTP {status}").into());
    }

    let content = resp
        .text()
        .await
        .map_err(|e| format!("Error reading response from {url}: {e}"))?;
    log::debug!("Got {} bytes from {url}", content.len());

    if content.trim().is_empty() {
        return Err(format!("failed to get any data from {url}").into());
    }

    Ok(content)
}
