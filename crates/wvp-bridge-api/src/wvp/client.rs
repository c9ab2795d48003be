// WVP API HTTP client
//
// Wraps `reqwest::Client` with voucher-scoped URL construction and the
// token header. Built per voucher: the host hands us credentials on every
// device-list call, so there is no long-lived session to share.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::auth::Voucher;
use crate::error::Error;
use crate::transport::{TransportConfig, decode_json, endpoint, send_cancellable};
use crate::wvp::models::{DevicePage, WvpResponse};

/// Endpoint layout of a WVP deployment.
///
/// Paths and the auth header differ between WVP releases, so they come
/// from configuration rather than being baked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WvpSettings {
    /// Scheme used when the voucher's server carries none.
    pub scheme: String,
    /// Paginated device query endpoint.
    pub devices_path: String,
    /// Header carrying the voucher's API token.
    pub token_header: String,
}

impl Default for WvpSettings {
    fn default() -> Self {
        Self {
            scheme: "http".into(),
            devices_path: "/api/device/query/devices".into(),
            token_header: "access-token".into(),
        }
    }
}

/// Async client for one WVP account.
pub struct WvpClient {
    http: reqwest::Client,
    base_url: Url,
    settings: WvpSettings,
}

impl WvpClient {
    /// Build from a voucher: base URL from `server`/`port`, token injected
    /// as a default header on every request.
    pub fn from_voucher(
        voucher: &Voucher,
        settings: &WvpSettings,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = voucher.base_url(&settings.scheme)?;

        let mut headers = HeaderMap::new();
        let name = HeaderName::from_bytes(settings.token_header.as_bytes()).map_err(|e| {
            Error::InvalidHeader {
                name: settings.token_header.clone(),
                message: e.to_string(),
            }
        })?;
        let mut value =
            HeaderValue::from_str(&voucher.api_token).map_err(|e| Error::InvalidHeader {
                name: settings.token_header.clone(),
                message: e.to_string(),
            })?;
        value.set_sensitive(true);
        headers.insert(name, value);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url,
            settings: settings.clone(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: Url, http: reqwest::Client, settings: WvpSettings) -> Self {
        Self {
            http,
            base_url,
            settings,
        }
    }

    /// The WVP root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        endpoint(&self.base_url, path)
    }

    /// List one page of devices.
    ///
    /// `GET {devices_path}?page={page}&count={page_size}`
    ///
    /// Connection failures come back as `Err`; a well-formed envelope with
    /// a non-zero `code` comes back as `Ok` for the caller to judge.
    pub async fn list_devices(
        &self,
        cancel: &CancellationToken,
        page: u32,
        page_size: u32,
    ) -> Result<WvpResponse<DevicePage>, Error> {
        let url = self.url(&self.settings.devices_path)?;
        debug!("GET {url} page={page} count={page_size}");

        let request = self.http.get(url).query(&[
            ("page", page.to_string()),
            ("count", page_size.to_string()),
        ]);
        let (status, body) = send_cancellable(cancel, request).await?;
        decode_json(status, &body)
    }
}
