// ── Runtime bridge configuration ──
//
// Describes *how* the bridge talks to WVP and what it serves the host.
// Never touches disk: `wvp-bridge-config` builds one of these from the
// config file and environment and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use wvp_bridge_api::{TransportConfig, WvpSettings};

use crate::model::DeviceNumberTemplate;

/// Default deadline for access-point lookups on the notification path.
pub const DEFAULT_ACCESS_POINT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Endpoint layout of the WVP deployments vouchers point at.
    pub wvp: WvpSettings,
    /// TLS and timeout settings for per-voucher WVP clients.
    pub transport: TransportConfig,
    /// Maps a WVP device id to the host's device number.
    pub device_number_template: DeviceNumberTemplate,
    /// JSON served for `SVCR` form requests. Read on every request.
    pub svcr_form_path: PathBuf,
    /// Upper bound on a single service-access lookup.
    pub access_point_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            wvp: WvpSettings::default(),
            transport: TransportConfig::default(),
            device_number_template: DeviceNumberTemplate::default(),
            svcr_form_path: PathBuf::from("./form_wvp.json"),
            access_point_timeout: DEFAULT_ACCESS_POINT_TIMEOUT,
        }
    }
}
