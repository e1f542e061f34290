//! Provider range discovery.
//!
//! This module handles fetching published ranges from each provider:
//! - [`http`] - shared HTTP retrieval
//! - [`microsoft`] - Microsoft 365 endpoint web service
//! - [`github`] - GitHub meta API

mod github;
mod http;
mod microsoft;

use crate::models::DiscoveredSet;
use clap::ValueEnum;
use futures::future::try_join_all;
use reqwest::Client;
use std::error::Error;

// Re-export public types and functions
pub use github::{get_github_ips, parse_github_data, GitHubMeta};
pub use http::{build_client, get_data};
pub use microsoft::{get_microsoft_ips, parse_ms_data, request_url, EndpointSet, ServiceFilter};

/// A source of published address ranges.
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Provider {
    /// Microsoft 365 endpoints
    Microsoft,
    /// GitHub meta API
    Github,
}

impl Provider {
    /// Short label used in output file names.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Microsoft => "m365",
            Provider::Github => "github",
        }
    }
}

/// Endpoint URLs, overridable for testing or mirrors.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub microsoft: String,
    pub github: String,
}

/// Labels of the providers joined with `-`, in the order given.
pub fn source_label(providers: &[Provider]) -> String {
    providers
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join("-")
}

/// Fetch every provider concurrently and merge their ranges.
///
/// Any failed fetch fails the whole discovery.
pub async fn discover(
    client: &Client,
    providers: &[Provider],
    endpoints: &Endpoints,
    filter: ServiceFilter,
) -> Result<DiscoveredSet, Box<dyn Error>> {
    let fetches = providers.iter().map(|provider| async move {
        match provider {
            Provider::Microsoft => get_microsoft_ips(client, &endpoints.microsoft, filter).await,
            Provider::Github => get_github_ips(client, &endpoints.github).await,
        }
    });

    let mut discovered = DiscoveredSet::new();
    for set in try_join_all(fetches).await? {
        discovered.merge(set);
    }

    log::info!(
        "Discovered {} unique ranges from {}",
        discovered.len(),
        source_label(providers)
    );
    Ok(discovered)
}
