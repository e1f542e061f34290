//! Address-set processing logic.
//!
//! This module contains the reduction engine:
//! - [`normalize`] - parsing raw provider strings into prefixes
//! - [`universe`] - single-family address universe with hole punching
//! - [`allow_list`] - dual-stack wrapper producing the allow-list

mod allow_list;
mod normalize;
mod universe;

// Re-export public functions
pub use allow_list::AllowList;
pub use normalize::{normalize, normalize_all};
pub use universe::AddressUniverse;
