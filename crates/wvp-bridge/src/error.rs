//! Startup error types with miette diagnostics.
//!
//! Anything that can stop the bridge before it serves: bad configuration,
//! an unusable platform client, or a listener that cannot bind.

use miette::Diagnostic;
use thiserror::Error;

use wvp_bridge_config::ConfigError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 3;
    pub const BIND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum StartupError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration in {path}")]
    #[diagnostic(
        code(wvp_bridge::config),
        help(
            "Check the file and any PLUGIN_WVP_* environment overrides.\n\
             Nested keys use a double underscore, e.g. PLUGIN_WVP_HTTP_SERVER__ADDRESS."
        )
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("Invalid listen address '{address}'")]
    #[diagnostic(
        code(wvp_bridge::listen_address),
        help("Expected host:port, e.g. 0.0.0.0:503")
    )]
    ListenAddress { address: String },

    #[error("Could not build the platform client")]
    #[diagnostic(
        code(wvp_bridge::platform_client),
        help("Check [platform] base_url and api_key_header.")
    )]
    PlatformClient {
        #[source]
        source: wvp_bridge_api::Error,
    },

    // ── Server ───────────────────────────────────────────────────────
    #[error("Could not bind {address}")]
    #[diagnostic(
        code(wvp_bridge::bind),
        help("Is another process listening on this port? Ports below 1024 may need privileges.")
    )]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error")]
    #[diagnostic(code(wvp_bridge::serve))]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

impl StartupError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::ListenAddress { .. } | Self::PlatformClient { .. } => {
                exit_code::CONFIG
            }
            Self::Bind { .. } => exit_code::BIND,
            Self::Serve { .. } => exit_code::GENERAL,
        }
    }
}
