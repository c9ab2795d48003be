//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

use wvp_bridge_config::DEFAULT_CONFIG_PATH;

/// ThingsPanel protocol plugin for WVP video platforms.
///
/// Serves the host callback routes (form descriptors, device listing,
/// disconnect and notifications) and proxies device queries to the WVP
/// server named in each tenant's voucher.
#[derive(Debug, Parser)]
#[command(name = "wvp-bridge", version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "PLUGIN_WVP_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override the listen address from the config file
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Validate the configuration and exit without serving
    #[arg(long)]
    pub check: bool,
}
