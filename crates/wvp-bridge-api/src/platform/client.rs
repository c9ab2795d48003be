// Host platform HTTP client
//
// Created once at startup and shared read-only by every request that
// needs to call back into the host.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::platform::models::{AccessPoint, PlatformResponse};
use crate::transport::{TransportConfig, decode_json, endpoint, send_cancellable};

/// Where the host's plugin API lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSettings {
    pub base_url: Url,
    pub service_access_path: String,
    /// Sent in `api_key_header` when non-empty.
    pub api_key: String,
    pub api_key_header: String,
}

/// Async client for the host platform's plugin API.
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: Url,
    service_access_path: String,
}

impl PlatformClient {
    pub fn new(settings: &PlatformSettings, transport: &TransportConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if !settings.api_key.is_empty() {
            let invalid = |message: String| Error::InvalidHeader {
                name: settings.api_key_header.clone(),
                message,
            };
            let name = HeaderName::from_bytes(settings.api_key_header.as_bytes())
                .map_err(|e| invalid(e.to_string()))?;
            let mut value =
                HeaderValue::from_str(&settings.api_key).map_err(|e| invalid(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self::from_reqwest(
            settings.base_url.clone(),
            http,
            settings.service_access_path.clone(),
        ))
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: Url, http: reqwest::Client, service_access_path: String) -> Self {
        Self {
            http,
            base_url,
            service_access_path,
        }
    }

    /// Resolve a service-access identifier to its access point.
    ///
    /// `POST {service_access_path}` with `{"service_access_id": "..."}`
    ///
    /// A non-200 `code` is a logical failure and is returned as `Ok` for the
    /// caller to inspect.
    pub async fn get_service_access(
        &self,
        cancel: &CancellationToken,
        service_access_id: &str,
    ) -> Result<PlatformResponse<AccessPoint>, Error> {
        let url = endpoint(&self.base_url, &self.service_access_path)?;
        debug!("POST {url} service_access_id={service_access_id}");

        let request = self
            .http
            .post(url)
            .json(&json!({ "service_access_id": service_access_id }));
        let (status, body) = send_cancellable(cancel, request).await?;
        decode_json(status, &body)
    }
}
