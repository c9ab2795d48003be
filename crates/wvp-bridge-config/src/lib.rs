//! Configuration for the WVP bridge.
//!
//! TOML file + `PLUGIN_WVP_*` environment overrides, validated and
//! translated into the runtime types `wvp_bridge_core` and
//! `wvp_bridge_api` consume.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use wvp_bridge_api::{PlatformSettings, TlsMode, TransportConfig, WvpSettings};
use wvp_bridge_core::{BridgeConfig, DeviceNumberTemplate};

/// Environment prefix; nested keys use `__`, e.g. `PLUGIN_WVP_HTTP_SERVER__ADDRESS`.
pub const ENV_PREFIX: &str = "PLUGIN_WVP_";

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub http_server: HttpServer,

    #[serde(default)]
    pub wvp: Wvp,

    #[serde(default)]
    pub platform: Platform,

    #[serde(default)]
    pub form: Form,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpServer {
    /// Listen address for the host callback routes.
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for HttpServer {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "0.0.0.0:503".into()
}

/// How the bridge reaches the WVP servers named in vouchers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Wvp {
    /// Device-number template; `%s` (or `{}`) is replaced by the WVP device id.
    #[serde(default = "default_device_number_key")]
    pub device_number_key: String,

    #[serde(default = "default_devices_path")]
    pub devices_path: String,

    #[serde(default = "default_token_header")]
    pub token_header: String,

    /// Used when a voucher's `server` has no scheme of its own.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_wvp_timeout")]
    pub timeout_secs: u64,

    /// Accept any TLS certificate from WVP servers.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,
}

impl Default for Wvp {
    fn default() -> Self {
        Self {
            device_number_key: default_device_number_key(),
            devices_path: default_devices_path(),
            token_header: default_token_header(),
            scheme: default_scheme(),
            timeout_secs: default_wvp_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

fn default_device_number_key() -> String {
    "wvp_%s".into()
}
fn default_devices_path() -> String {
    "/api/device/query/devices".into()
}
fn default_token_header() -> String {
    "access-token".into()
}
fn default_scheme() -> String {
    "http".into()
}
fn default_wvp_timeout() -> u64 {
    30
}

/// The host platform's plugin API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Platform {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_service_access_path")]
    pub service_access_path: String,

    /// Sent in `api_key_header` when non-empty.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Deadline for one service-access lookup.
    #[serde(default = "default_platform_timeout")]
    pub timeout_secs: u64,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            service_access_path: default_service_access_path(),
            api_key: String::new(),
            api_key_header: default_api_key_header(),
            timeout_secs: default_platform_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:9999".into()
}
fn default_service_access_path() -> String {
    "/api/v1/plugin/service/access".into()
}
fn default_api_key_header() -> String {
    "x-api-key".into()
}
fn default_platform_timeout() -> u64 {
    5
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Form {
    /// JSON file served for `SVCR` form requests.
    #[serde(default = "default_svcr_path")]
    pub svcr_path: PathBuf,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            svcr_path: default_svcr_path(),
        }
    }
}

fn default_svcr_path() -> PathBuf {
    PathBuf::from("./form_wvp.json")
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path` (missing file means defaults) plus environment.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    config.validate()?;
    Ok(config)
}

// ── Translation to runtime types ────────────────────────────────────

impl Config {
    /// Check every field that would otherwise fail later at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server_address()?;
        self.platform_base_url()?;

        if self.wvp.timeout_secs == 0 {
            return Err(invalid("wvp.timeout_secs", "must be greater than zero"));
        }
        if self.platform.timeout_secs == 0 {
            return Err(invalid("platform.timeout_secs", "must be greater than zero"));
        }
        if !matches!(self.wvp.scheme.as_str(), "http" | "https") {
            return Err(invalid(
                "wvp.scheme",
                format!("expected 'http' or 'https', got '{}'", self.wvp.scheme),
            ));
        }
        if self.wvp.token_header.trim().is_empty() {
            return Err(invalid("wvp.token_header", "must not be empty"));
        }
        Ok(())
    }

    pub fn server_address(&self) -> Result<SocketAddr, ConfigError> {
        self.http_server
            .address
            .parse()
            .map_err(|_| {
                invalid(
                    "http_server.address",
                    format!("not a socket address: {}", self.http_server.address),
                )
            })
    }

    fn platform_base_url(&self) -> Result<Url, ConfigError> {
        self.platform
            .base_url
            .parse()
            .map_err(|_| {
                invalid(
                    "platform.base_url",
                    format!("invalid URL: {}", self.platform.base_url),
                )
            })
    }

    /// TLS and timeout for per-voucher WVP clients.
    pub fn wvp_transport(&self) -> TransportConfig {
        let tls = if self.wvp.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.wvp.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };
        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.wvp.timeout_secs),
        }
    }

    /// Transport for the host platform client.
    pub fn platform_transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::System,
            timeout: Duration::from_secs(self.platform.timeout_secs),
        }
    }

    pub fn platform_settings(&self) -> Result<PlatformSettings, ConfigError> {
        Ok(PlatformSettings {
            base_url: self.platform_base_url()?,
            service_access_path: self.platform.service_access_path.clone(),
            api_key: self.platform.api_key.clone(),
            api_key_header: self.platform.api_key_header.clone(),
        })
    }

    pub fn to_bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            wvp: WvpSettings {
                scheme: self.wvp.scheme.clone(),
                devices_path: self.wvp.devices_path.clone(),
                token_header: self.wvp.token_header.clone(),
            },
            transport: self.wvp_transport(),
            device_number_template: DeviceNumberTemplate::new(self.wvp.device_number_key.clone()),
            svcr_form_path: self.form.svcr_path.clone(),
            access_point_timeout: Duration::from_secs(self.platform.timeout_secs),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server_address().unwrap().port(), 503);
        assert_eq!(config.wvp.device_number_key, "wvp_%s");
    }

    #[test]
    fn file_overrides_defaults_per_field() {
        let file = write_config(
            r#"
            [http_server]
            address = "127.0.0.1:8080"

            [wvp]
            device_number_key = "cam-{}"
            insecure = true

            [platform]
            base_url = "http://tp.local:9999"
            api_key = "k"
            timeout_secs = 2
            "#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.server_address().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.wvp.devices_path, "/api/device/query/devices");
        assert!(matches!(config.wvp_transport().tls, TlsMode::DangerAcceptInvalid));

        let bridge = config.to_bridge_config();
        assert_eq!(bridge.device_number_template.render("42"), "cam-42");
        assert_eq!(bridge.access_point_timeout, Duration::from_secs(2));
        assert_eq!(bridge.transport.timeout, Duration::from_secs(30));

        let platform = config.platform_settings().unwrap();
        assert_eq!(platform.base_url.as_str(), "http://tp.local:9999/");
        assert_eq!(platform.api_key_header, "x-api-key");
    }

    #[test]
    fn rejects_bad_address() {
        let file = write_config("[http_server]\naddress = \"not-an-address\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "http_server.address"),
            "got: {err:?}"
        );
    }

    #[test]
    fn rejects_bad_platform_url() {
        let file = write_config("[platform]\nbase_url = \"::nope\"\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let file = write_config("[platform]\ntimeout_secs = 0\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn rejects_wrong_types() {
        let file = write_config("[wvp]\ntimeout_secs = \"soon\"\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn ca_cert_selects_custom_ca() {
        let file = write_config("[wvp]\nca_cert = \"/etc/wvp/ca.pem\"\n");
        let config = load_config(file.path()).unwrap();
        assert!(matches!(
            config.wvp_transport().tls,
            TlsMode::CustomCa(ref p) if p == Path::new("/etc/wvp/ca.pem")
        ));
    }
}
