// cargo watch -x 'fmt' -x 'run'  // 'run -- --provider microsoft,github'

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod providers;

use chrono::{DateTime, Local};
use cli::Args;
use models::{DiscoveredSet, Prefix};
use processing::AllowList;
use providers::ServiceFilter;
use std::error::Error;
use std::path::PathBuf;

/// Where results go.
#[derive(Debug, Clone)]
pub struct OutputTargets {
    pub dir: PathBuf,
    pub routes: bool,
    pub allow_list: bool,
}

/// What a run produced.
#[derive(Debug)]
pub struct RunReport {
    pub discovered: DiscoveredSet,
    pub allow_list: Vec<Prefix>,
    pub routes_file: Option<PathBuf>,
    pub allow_list_file: Option<PathBuf>,
}

/// Build the allow-list from the discovered ranges and write the requested files.
pub fn emit(
    discovered: DiscoveredSet,
    source: &str,
    filter: ServiceFilter,
    targets: &OutputTargets,
    now: &DateTime<Local>,
) -> Result<RunReport, Box<dyn Error>> {
    std::fs::create_dir_all(&targets.dir).map_err(|e| {
        format!(
            "failed to create output directory {:?}: {e}",
            targets.dir.display()
        )
    })?;

    let routes_file = if targets.routes {
        let name = output::routes_file_name(now, source, filter);
        Some(output::write_routes_file(&discovered, &targets.dir, &name)?)
    } else {
        None
    };

    let allow_list = AllowList::from_discovered(&discovered)?.snapshot();

    let allow_list_file = if targets.allow_list {
        let name = output::allow_list_file_name(now, filter);
        Some(output::write_allow_list_file(&allow_list, &targets.dir, &name)?)
    } else {
        None
    };

    Ok(RunReport {
        discovered,
        allow_list,
        routes_file,
        allow_list_file,
    })
}

/// Fetch every selected provider, then emit the results.
pub async fn run(args: &Args) -> Result<RunReport, Box<dyn Error>> {
    let selected = args.providers();
    let source = providers::source_label(&selected);
    log::info!(
        "#Start run() providers={source} filter={} output_dir={:?}",
        args.filter,
        args.output_dir.display()
    );
    if args.no_routes && args.no_allow_list {
        log::warn!("Both output files are disabled, only printing a summary");
    }

    let client = providers::build_client(args.timeout())?;
    let discovered =
        providers::discover(&client, &selected, &args.endpoints(), args.filter).await?;

    let targets = OutputTargets {
        dir: args.output_dir.clone(),
        routes: !args.no_routes,
        allow_list: !args.no_allow_list,
    };
    let report = emit(discovered, &source, args.filter, &targets, &Local::now())?;
    output::print_summary(&source, &report.discovered, &report.allow_list);

    Ok(report)
}
