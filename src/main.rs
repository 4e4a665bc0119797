use anyhow::Result;
use clap::Parser;
use std::path::Path;

mod cli;

use cost_diagnosis::{catalog, config, init_tracing, server};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    match args.get_command() {
        cli::Commands::Serve => {
            let cfg = config::load_config(&args.config)?;
            server::start_server(cfg).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => {
                let cfg = config::load_config(&args.config)?;
                println!("{}", serde_json::to_string_pretty(&cfg.redacted())?);
            }
            cli::ConfigCommands::Validate => {
                let cfg = config::load_config(&args.config)?;
                // A valid config with unreadable reference data is still
                // a broken deployment, so check those too.
                catalog::load_catalog(Path::new(&cfg.catalog.services_file))?;
                catalog::load_default_plans(Path::new(&cfg.catalog.default_plans_file))?;
                println!("Configuration OK");
            }
        },
        cli::Commands::Version => {
            println!("cost-diagnosis v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
