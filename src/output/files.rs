//! Route dump and WireGuard allow-list files.

use crate::config::{DELIMITER, FILE_START, TIMESTAMP_FORMAT};
use crate::models::{DiscoveredSet, Prefix};
use chrono::{DateTime, TimeZone};
use std::error::Error;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Every entry followed by the delimiter, including the last one.
pub fn format_routes(ips: &DiscoveredSet) -> String {
    ips.iter().map(|ip| format!("{ip}{DELIMITER}")).collect()
}

/// `AllowedIPs = ` followed by the prefixes joined with the delimiter.
pub fn format_allow_list(prefixes: &[Prefix]) -> String {
    let joined = prefixes
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<String>>()
        .join(DELIMITER);
    format!("{FILE_START}{joined}")
}

/// `{timestamp}_{source}_routes_{filter}.txt`
pub fn routes_file_name<Tz>(now: &DateTime<Tz>, source: &str, filter: impl Display) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}_{source}_routes_{filter}.txt", now.format(TIMESTAMP_FORMAT))
}

/// `{timestamp}_wireguard_allowList_{filter}.txt`
pub fn allow_list_file_name<Tz>(now: &DateTime<Tz>, filter: impl Display) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}_wireguard_allowList_{filter}.txt",
        now.format(TIMESTAMP_FORMAT)
    )
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .map_err(|e| format!("failed to create file {:?}: {e}", path.display()))?;
    Ok(path)
}

/// Write the discovered ranges to `dir`.
pub fn write_routes_file(
    ips: &DiscoveredSet,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = write_file(dir, file_name, &format_routes(ips))?;
    log::info!("Wrote addresses to {:?}", path.display());
    Ok(path)
}

/// Write the allow-list to `dir`.
pub fn write_allow_list_file(
    prefixes: &[Prefix],
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = write_file(dir, file_name, &format_allow_list(prefixes))?;
    log::info!("Wrote wireguard allowlist to {:?}", path.display());
    Ok(path)
}
