use clap::Parser;
use cloud_allowlist::cli::Args;
use cloud_allowlist::logging::init_logging;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_config)?;
    //
    log::info!("#Start main()");

    cloud_allowlist::run(&args).await?;

    log::info!("Fin.");
    Ok(())
}
