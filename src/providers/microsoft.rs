//! Microsoft 365 endpoint web service.
//!
//! Fetches the worldwide endpoint sets and collects the IP ranges of the
//! service areas selected by a [`ServiceFilter`].

use super::http;
use crate::models::DiscoveredSet;
use colored::Colorize;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One endpoint set from the web service response.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSet {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub service_area: String,
    #[serde(default)]
    pub service_area_display_name: String,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub ips: Vec<String>,
    pub tcp_ports: Option<String>,
    pub udp_ports: Option<String>,
    #[serde(default)]
    pub express_route: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub required: bool,
    pub notes: Option<String>,
}

/// Service-area selection for the Microsoft provider.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ServiceFilter {
    #[default]
    All,
    Exchange,
    /// Skype for Business, includes Teams.
    Skype,
    SharePoint,
    Common,
}

impl ServiceFilter {
    /// Whether an endpoint set's service area is selected.
    pub fn matches(&self, service_area: &str) -> bool {
        match self {
            ServiceFilter::All => true,
            other => service_area.contains(other.name()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServiceFilter::All => "all",
            ServiceFilter::Exchange => "Exchange",
            ServiceFilter::Skype => "Skype",
            ServiceFilter::SharePoint => "SharePoint",
            ServiceFilter::Common => "Common",
        }
    }
}

impl FromStr for ServiceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(ServiceFilter::All),
            "exchange" => Ok(ServiceFilter::Exchange),
            "skype" => Ok(ServiceFilter::Skype),
            "sharepoint" => Ok(ServiceFilter::SharePoint),
            "common" => Ok(ServiceFilter::Common),
            _ => Err(format!(
                "Unrecognised filter {s:?}, expected one of: all, Exchange, Skype, SharePoint, Common"
            )),
        }
    }
}

impl fmt::Display for ServiceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Request URL with a fresh client request id.
pub fn request_url(base_url: &str) -> String {
    let sep = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{sep}clientRequestId={}", Uuid::new_v4())
}

/// Parse the web service response and collect the selected ranges.
///
/// # Returns
/// * `Ok(DiscoveredSet)` - Unique range strings, as published
/// * `Err` - If the JSON does not match the endpoint set layout
pub fn parse_ms_data(json: &str, filter: ServiceFilter) -> Result<DiscoveredSet, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let parsed: Vec<EndpointSet> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("failed to unmarshal JSON: path={} error={}", e.path(), e))?;

    let mut ips = DiscoveredSet::new();

    for route in parsed.iter().filter(|r| !r.ips.is_empty()) {
        if !filter.matches(&route.service_area) {
            log::trace!("skip endpoint set {} ({})", route.id, route.service_area);
            continue;
        }
        println!(
            "\t{} {}: {} IPs",
            route.service_area_display_name.bold(),
            route.id,
            route.ips.len()
        );
        for ip in &route.ips {
            ips.insert(ip);
        }
    }

    log::info!(
        "Microsoft: {} endpoint sets, {} unique ranges for filter {filter}",
        parsed.len(),
        ips.len()
    );
    Ok(ips)
}

/// Fetch and parse the Microsoft 365 ranges.
pub async fn get_microsoft_ips(
    client: &Client,
    base_url: &str,
    filter: ServiceFilter,
) -> Result<DiscoveredSet, Box<dyn Error>> {
    let data = http::get_data(client, &request_url(base_url)).await?;
    log::info!("Parsing data");
    parse_ms_data(&data, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_DATA: &str = "src/tests/test_data/m365_endpoints.json";

    fn read_test_data() -> String {
        std::fs::read_to_string(TEST_DATA).expect("Error reading test data")
    }

    #[test]
    fn test_service_filter_from_str() {
        assert_eq!("all".parse::<ServiceFilter>().unwrap(), ServiceFilter::All);
        assert_eq!(
            "SharePoint".parse::<ServiceFilter>().unwrap(),
            ServiceFilter::SharePoint
        );
        assert_eq!("skype".parse::<ServiceFilter>().unwrap(), ServiceFilter::Skype);
        assert!("Teams".parse::<ServiceFilter>().is_err());
    }

    #[test]
    fn test_service_filter_matches_substring() {
        assert!(ServiceFilter::All.matches("Exchange"));
        assert!(ServiceFilter::Exchange.matches("Exchange"));
        assert!(!ServiceFilter::Exchange.matches("Skype"));
        assert!(ServiceFilter::Common.matches("Common"));
    }

    #[test]
    fn test_request_url() {
        let url = request_url("https://endpoints.office.com/endpoints/worldwide");
        assert!(url.starts_with("https://endpoints.office.com/endpoints/worldwide?clientRequestId="));
        let id = url.rsplit('=').next().unwrap();
        assert!(Uuid::parse_str(id).is_ok());

        let url = request_url("http://localhost/endpoints?format=json");
        assert!(url.contains("?format=json&clientRequestId="));
    }

    #[test]
    fn test_parse_ms_data_all() {
        let ips = parse_ms_data(&read_test_data(), ServiceFilter::All).unwrap();
        // 13.107.6.152/31 is listed by two endpoint sets
        assert_eq!(ips.len(), 10);
        assert!(ips.ranges.contains("13.107.6.152/31"));
        assert!(ips.ranges.contains("2603:1006::/40"));
    }

    #[test]
    fn test_parse_ms_data_filtered() {
        let ips = parse_ms_data(&read_test_data(), ServiceFilter::Skype).unwrap();
        assert_eq!(
            ips.iter().collect::<Vec<_>>(),
            vec!["13.107.64.0/18", "2603:1063::/38", "52.112.0.0/14"]
        );

        let ips = parse_ms_data(&read_test_data(), ServiceFilter::SharePoint).unwrap();
        assert_eq!(ips.iter().collect::<Vec<_>>(), vec!["13.107.136.0/22"]);
    }

    #[test]
    fn test_parse_ms_data_missing_fields_default() {
        let ips = parse_ms_data(r#"[{"id":1,"ips":["1.2.3.0/24"]}]"#, ServiceFilter::All).unwrap();
        assert_eq!(ips.iter().collect::<Vec<_>>(), vec!["1.2.3.0/24"]);

        // no service area, so only `all` selects it
        let ips = parse_ms_data(r#"[{"ips":["1.2.3.0/24"]}]"#, ServiceFilter::Exchange).unwrap();
        assert!(ips.is_empty());

        let ips = parse_ms_data(r#"[{"serviceArea":"Common"}]"#, ServiceFilter::All).unwrap();
        assert!(ips.is_empty());
    }

    #[test]
    fn test_parse_ms_data_rejects_bad_json() {
        assert!(parse_ms_data("{\"not\": \"a list\"}", ServiceFilter::All).is_err());
        assert!(parse_ms_data("[{\"id\": \"x\"}]", ServiceFilter::All).is_err());
    }
}
