pub mod cli;
pub mod toml_config;

pub use toml_config::TomlConfig;

use clap::Parser;

/// Portal data entry and reporting for the Hajj ecosystem surveys.
#[derive(Debug, Parser)]
#[command(name = "haji-portal")]
#[command(about = "Ekosistem Haji survey portal: data entry, reports and CSV export")]
#[command(version)]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Override the snapshot path from the config file
    #[arg(long, global = true)]
    pub data_path: Option<String>,

    /// Override the export directory from the config file
    #[arg(long, global = true)]
    pub export_dir: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: cli::Command,
}
