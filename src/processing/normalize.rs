//! Range normalisation.
//!
//! Turns raw provider strings into typed [`Prefix`] values, skipping anything
//! that is neither a CIDR prefix nor a bare address.

use crate::models::Prefix;
use std::error::Error;
use std::net::IpAddr;

/// Parse an entry as a CIDR prefix, falling back to a bare address.
///
/// A bare address becomes a /32 or /128 prefix.
pub fn normalize(entry: &str) -> Result<Prefix, Box<dyn Error>> {
    let entry = entry.trim();
    match Prefix::new(entry) {
        Ok(prefix) => Ok(prefix),
        Err(prefix_err) => match entry.parse::<IpAddr>() {
            Ok(addr) => Ok(Prefix::host(addr)),
            Err(_) => Err(format!("not a prefix or address ({prefix_err})").into()),
        },
    }
}

/// Normalise every entry, logging and skipping the ones that fail.
pub fn normalize_all<'a, I>(entries: I) -> Vec<Prefix>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut skipped = 0;
    let prefixes: Vec<Prefix> = entries
        .into_iter()
        .filter_map(|entry| match normalize(entry) {
            Ok(prefix) => Some(prefix),
            Err(e) => {
                log::warn!("Error parsing input {entry:?} as range: {e}. Skipping it...");
                skipped += 1;
                None
            }
        })
        .collect();

    log::debug!(
        "normalize_all() parsed={} skipped={skipped}",
        prefixes.len()
    );
    prefixes
}
