//! Terminal output utilities.

use crate::models::{DiscoveredSet, Family, Prefix};
use colored::Colorize;

/// Format a value as a right-aligned field.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    format!("{:>width$}", value.to_string())
}

/// Per-family prefix counts of an allow-list snapshot.
pub fn family_counts(prefixes: &[Prefix]) -> (usize, usize) {
    let v4 = prefixes.iter().filter(|p| p.family() == Family::V4).count();
    (v4, prefixes.len() - v4)
}

/// Print a short summary of the run to stdout.
pub fn print_summary(source: &str, discovered: &DiscoveredSet, allow_list: &[Prefix]) {
    let (v4, v6) = family_counts(allow_list);
    println!(
        "{} {} discovered ranges from {}",
        "#".on_blue(),
        format_field(discovered.len(), 6),
        source.bold()
    );
    println!(
        "{} {} allow-list prefixes ({v4} IPv4, {v6} IPv6)",
        "#".on_blue(),
        format_field(allow_list.len(), 6)
    );
}
