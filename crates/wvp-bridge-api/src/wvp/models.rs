// WVP API response types
//
// Fields use `#[serde(default)]` liberally because WVP releases disagree
// about which fields are present, and some return `null` lists on empty pages.

use serde::{Deserialize, Deserializer, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard WVP response envelope.
///
/// ```json
/// { "code": 0, "msg": "成功", "data": { ... } }
/// ```
///
/// A non-zero `code` is a business-level rejection, reported by the remote
/// side in a well-formed body. It is returned as data, not as an error.
#[derive(Debug, Clone, Deserialize)]
pub struct WvpResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> WvpResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Remote message, or a synthetic one naming the code.
    pub fn message(&self) -> String {
        self.msg
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("WVP returned code {}", self.code))
    }
}

// ── Devices ──────────────────────────────────────────────────────────

/// One page of `GET /api/device/query/devices`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevicePage {
    #[serde(default)]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub list: Vec<WvpDevice>,
}

/// A GB28181 device as WVP reports it.
///
/// Only the fields the bridge projects are modelled; the rest land in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WvpDevice {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "onLine", alias = "onlineStatus")]
    pub on_line: bool,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
