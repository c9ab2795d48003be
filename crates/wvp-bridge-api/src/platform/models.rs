use serde::{Deserialize, Serialize};

/// Host-platform response envelope. `code == 200` is success.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> PlatformResponse<T> {
    pub const SUCCESS: i64 = 200;

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }
}

/// A resolved service access point.
///
/// Schema-on-read: the bridge looks at the identifier and the embedded
/// voucher; everything else is carried through untouched to whoever
/// consumes the property update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_access_id: Option<String>,
    /// JSON-encoded voucher the tenant saved for this access point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn access_point_passes_unknown_fields_through() {
        let raw = r#"{"service_access_id":"sa-1","voucher":"{}","devices":[{"id":"d1"}]}"#;
        let ap: AccessPoint = serde_json::from_str(raw).unwrap();
        assert_eq!(ap.service_access_id.as_deref(), Some("sa-1"));

        let back = serde_json::to_value(&ap).unwrap();
        assert_eq!(back["devices"][0]["id"], "d1");
    }

    #[test]
    fn success_is_http_style_200() {
        let resp: PlatformResponse<AccessPoint> =
            serde_json::from_str(r#"{"code":200,"message":"ok","data":{}}"#).unwrap();
        assert!(resp.is_success());

        let resp: PlatformResponse<AccessPoint> =
            serde_json::from_str(r#"{"code":0,"message":"ok"}"#).unwrap();
        assert!(!resp.is_success());
    }
}
