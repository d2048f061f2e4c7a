//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "relay", version, about = "Local AI request router and orchestration layer")]
pub struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, env = "RELAY_CONFIG", default_value = "./relay.toml")]
    pub config: PathBuf,

    /// Overrides `data.data_dir` from the config file.
    #[arg(long, env = "RELAY_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Overrides the port the server listens on.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// `EnvFilter` string controlling log verbosity, e.g. `"info"` or `"server=debug"`.
    #[arg(long, env = "RELAY_LOG", default_value = "info")]
    pub log_filter: String,
}
