//! Output of discovered ranges and allow-lists.
//!
//! This module handles formatting and writing results:
//! - [`files`] - route dump and WireGuard allow-list files
//! - [`terminal`] - run summary on stdout

mod files;
mod terminal;

pub use files::{
    allow_list_file_name, format_allow_list, format_routes, routes_file_name,
    write_allow_list_file, write_routes_file,
};
pub use terminal::{family_counts, format_field, print_summary};
