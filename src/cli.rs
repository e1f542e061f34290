//! Command line arguments.
//!
//! Every flag can also be set through an environment variable, and `main`
//! loads a `.env` file before parsing.

use crate::config;
use crate::providers::{Endpoints, Provider, ServiceFilter};
use clap::Parser;
use itertools::Itertools;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "cloud-allowlist", version)]
#[command(about = "Build a WireGuard allow-list that excludes published cloud provider ranges.")]
pub struct Args {
    /// Service filter: 'Exchange', 'Skype' (inc. Teams), 'SharePoint', 'Common' or 'all'
    #[arg(short, long, env = "ALLOWLIST_FILTER", default_value = "all")]
    pub filter: ServiceFilter,

    /// Providers to fetch ranges from
    #[arg(
        short,
        long = "provider",
        value_enum,
        env = "ALLOWLIST_PROVIDERS",
        value_delimiter = ',',
        default_value = "microsoft"
    )]
    pub providers: Vec<Provider>,

    /// Directory the output files are written to
    #[arg(short, long, env = "ALLOWLIST_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip writing the discovered routes file
    #[arg(long)]
    pub no_routes: bool,

    /// Skip writing the WireGuard allow-list file
    #[arg(long)]
    pub no_allow_list: bool,

    #[arg(long, env = "ALLOWLIST_MICROSOFT_URL", default_value = config::MICROSOFT_URL)]
    pub microsoft_url: String,

    #[arg(long, env = "ALLOWLIST_GITHUB_URL", default_value = config::GITHUB_URL)]
    pub github_url: String,

    /// HTTP request timeout
    #[arg(long, env = "ALLOWLIST_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// log4rs configuration file
    #[arg(long, env = "ALLOWLIST_LOG_CONFIG", default_value = config::DEFAULT_LOG_CONFIG)]
    pub log_config: PathBuf,
}

impl Args {
    /// Selected providers without repeats, in the order given.
    pub fn providers(&self) -> Vec<Provider> {
        self.providers.iter().copied().unique().collect()
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            microsoft: self.microsoft_url.clone(),
            github: self.github_url.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
