//! Fixed constants shared by the pipeline.

/// Microsoft 365 endpoint web service; a fresh `clientRequestId` is appended.
/// See more: http://aka.ms/ipurlws
pub const MICROSOFT_URL: &str = "https://endpoints.office.com/endpoints/worldwide";
/// GitHub meta API.
pub const GITHUB_URL: &str = "https://api.github.com/meta";

/// Seeds for the two address universes.
pub const IPV4_RANGE: &str = "0.0.0.0/0";
pub const IPV6_RANGE: &str = "::/0";

/// Literal prefix of the WireGuard allow-list file.
pub const FILE_START: &str = "AllowedIPs = ";
/// Separator between entries in both output files.
pub const DELIMITER: &str = ", ";

/// chrono format for output file name timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
