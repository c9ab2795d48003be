use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::Error;

/// Per-tenant credentials for one WVP platform account.
///
/// Supplied by the host as the `voucher` form field and cached so later
/// notifications can recover it. Nothing is validated upfront: an empty
/// server or token only shows up as a failed remote call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Voucher {
    #[serde(default)]
    pub server: String,
    #[serde(default, deserialize_with = "port_from_number_or_text")]
    pub port: u16,
    #[serde(rename = "apiToken", default)]
    pub api_token: String,
}

impl Voucher {
    pub fn new(server: impl Into<String>, port: u16, api_token: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            port,
            api_token: api_token.into(),
        }
    }

    /// Encode for cache storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a cached value produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Root URL of the WVP instance this voucher points at.
    ///
    /// `server` may be a bare host (`10.0.0.5`), carry its own scheme
    /// (`https://wvp.example.com`) or a path prefix (`https://host/wvp`).
    /// A non-zero `port` always wins over whatever port the server string
    /// names. A server that does not form a URL is `Error::InvalidVoucher`.
    pub fn base_url(&self, default_scheme: &str) -> Result<Url, Error> {
        let invalid = |message: String| Error::InvalidVoucher {
            server: self.server.clone(),
            message,
        };

        let server = self.server.trim().trim_end_matches('/');
        let raw = if server.contains("://") {
            server.to_owned()
        } else {
            format!("{default_scheme}://{server}")
        };
        let mut url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;

        if self.port != 0 {
            url.set_port(Some(self.port))
                .map_err(|()| invalid("server cannot carry a port".into()))?;
        }
        Ok(url)
    }
}

/// Form-built vouchers sometimes carry the port as a string.
fn port_from_number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u16),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(port) => Ok(port),
        Raw::Text(text) if text.trim().is_empty() => Ok(0),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl fmt::Debug for Voucher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Voucher")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decodes_host_field_names() {
        let v: Voucher =
            serde_json::from_str(r#"{"server":"10.0.0.5","port":18080,"apiToken":"tok"}"#)
                .unwrap();
        assert_eq!(v, Voucher::new("10.0.0.5", 18080, "tok"));
    }

    #[test]
    fn accepts_port_as_text() {
        let v: Voucher =
            serde_json::from_str(r#"{"server":"h","port":" 18080 ","apiToken":"t"}"#).unwrap();
        assert_eq!(v.port, 18080);

        let v: Voucher = serde_json::from_str(r#"{"server":"h","port":""}"#).unwrap();
        assert_eq!(v.port, 0);

        assert!(serde_json::from_str::<Voucher>(r#"{"port":"eighty"}"#).is_err());
    }

    #[test]
    fn bytes_survive_cache_encoding() {
        let v = Voucher::new("wvp.local", 80, "secret");
        assert_eq!(Voucher::from_bytes(&v.to_bytes().unwrap()).unwrap(), v);
    }

    #[test]
    fn base_url_from_bare_host() {
        let url = Voucher::new("10.0.0.5", 18080, "t").base_url("http").unwrap();
        assert_eq!(url.as_str(), "http://10.0.0.5:18080/");
    }

    #[test]
    fn base_url_keeps_explicit_scheme() {
        let url = Voucher::new("https://wvp.example.com/", 0, "t")
            .base_url("http")
            .unwrap();
        assert_eq!(url.as_str(), "https://wvp.example.com/");
    }

    #[test]
    fn base_url_keeps_path_prefix() {
        let url = Voucher::new("https://wvp.example.com/wvp/", 8443, "t")
            .base_url("http")
            .unwrap();
        assert_eq!(url.as_str(), "https://wvp.example.com:8443/wvp");
    }

    #[test]
    fn empty_server_is_invalid_voucher() {
        let v: Voucher = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            v.base_url("http"),
            Err(Error::InvalidVoucher { ref server, .. }) if server.is_empty()
        ));
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", Voucher::new("h", 1, "super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
