//! GitHub meta API.

use super::http;
use crate::models::{DiscoveredSet, Prefix};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// The parts of `/meta` that carry address ranges.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct GitHubMeta {
    pub hooks: Vec<String>,
    pub web: Vec<String>,
    pub api: Vec<String>,
    pub git: Vec<String>,
    pub github_enterprise_importer: Vec<String>,
    pub packages: Vec<String>,
    pub pages: Vec<String>,
    pub importer: Vec<String>,
    pub actions: Vec<String>,
    pub actions_macos: Vec<String>,
    pub codespaces: Vec<String>,
    pub dependabot: Vec<String>,
    pub copilot: Vec<String>,
}

impl GitHubMeta {
    /// Groups whose ranges are collected, by name.
    pub fn groups(&self) -> [(&'static str, &Vec<String>); 7] {
        [
            ("hooks", &self.hooks),
            ("api", &self.api),
            ("git", &self.git),
            ("pages", &self.pages),
            ("codespaces", &self.codespaces),
            ("copilot", &self.copilot),
            ("dependabot", &self.dependabot),
        ]
    }
}

/// Parse the `/meta` response and collect the ranges of the known groups.
///
/// Entries that are not CIDR prefixes are dropped here.
pub fn parse_github_data(json: &str) -> Result<DiscoveredSet, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let parsed: GitHubMeta = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("failed to unmarshal JSON: path={} error={}", e.path(), e))?;

    let mut ips = DiscoveredSet::new();

    for (group, ranges) in parsed.groups() {
        let mut added = 0;
        for ip in ranges {
            if let Err(e) = Prefix::new(ip) {
                log::debug!("GitHub {group}: dropping {ip:?}: {e}");
                continue;
            }
            if ips.insert(ip) {
                added += 1;
            }
        }
        log::debug!("GitHub {group}: {} ranges, {added} new", ranges.len());
    }

    log::info!("GitHub: {} unique ranges", ips.len());
    Ok(ips)
}

/// Fetch and parse the GitHub ranges.
pub async fn get_github_ips(client: &Client, url: &str) -> Result<DiscoveredSet, Box<dyn Error>> {
    let data = http::get_data(client, url).await?;
    log::info!("Parsing data");
    parse_github_data(&data)
}
