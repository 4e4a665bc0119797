use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cost-diagnosis", version, about = "SaaS cost diagnosis API server")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the diagnosis server (default)
    Serve,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration (secrets masked)
    Show,
    /// Validate the configuration file and reference data
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::parse_from(["cost-diagnosis"]);
        assert!(matches!(cli.get_command(), Commands::Serve));
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn test_parses_config_validate() {
        let cli = Cli::parse_from(["cost-diagnosis", "config", "validate", "-c", "prod.toml"]);
        assert!(matches!(
            cli.get_command(),
            Commands::Config {
                action: ConfigCommands::Validate
            }
        ));
        assert_eq!(cli.config, PathBuf::from("prod.toml"));
    }
}
