// Shared transport configuration and request plumbing.
//
// Both the WVP and platform clients share TLS and timeout settings
// through this module, plus the cancellable send and JSON decode steps.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::trace;
use url::Url;

use crate::error::Error;

const USER_AGENT: &str = concat!("wvp-bridge/", env!("CARGO_PKG_VERSION"));

/// Longest body excerpt carried in `Error::Http`.
const BODY_PREVIEW_LEN: usize = 200;

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (self-signed WVP deployments).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used to inject the voucher token / platform API key on every request.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// Send a request and read its body, aborting early if `cancel` fires.
///
/// Returns the HTTP status alongside the raw body text.
pub(crate) async fn send_cancellable(
    cancel: &CancellationToken,
    request: reqwest::RequestBuilder,
) -> Result<(reqwest::StatusCode, String), Error> {
    let exchange = async {
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok::<_, Error>((status, body))
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        result = exchange => result,
    }
}

/// Resolve an endpoint path below `base`.
///
/// Joined relative to `base`, so a path prefix in `base` (`/wvp`) is kept
/// even when `path` is written absolute.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, Error> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    Ok(base.join(path.trim_start_matches('/'))?)
}

/// Reject non-2xx statuses, then decode the body as JSON.
pub(crate) fn decode_json<T: DeserializeOwned>(
    status: reqwest::StatusCode,
    body: &str,
) -> Result<T, Error> {
    trace!(%status, body_len = body.len(), "decoding response");

    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            body: preview(body).to_owned(),
        });
    }

    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_non_success_status() {
        let result: Result<serde_json::Value, _> =
            decode_json(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        match result {
            Err(Error::Http { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("expected Http error, got: {other:?}"),
        }
    }

    #[test]
    fn decode_keeps_raw_body_on_parse_failure() {
        let result: Result<serde_json::Value, _> = decode_json(reqwest::StatusCode::OK, "{");
        match result {
            Err(Error::Deserialization { body, .. }) => assert_eq!(body, "{"),
            other => panic!("expected Deserialization error, got: {other:?}"),
        }
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let base = Url::parse("https://wvp.example.com/wvp").unwrap();
        let url = endpoint(&base, "/api/device/query/devices").unwrap();
        assert_eq!(url.as_str(), "https://wvp.example.com/wvp/api/device/query/devices");

        let root = Url::parse("http://10.0.0.5:18080").unwrap();
        let url = endpoint(&root, "/api/v1/plugin/service/access").unwrap();
        assert_eq!(url.as_str(), "http://10.0.0.5:18080/api/v1/plugin/service/access");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let long = "设".repeat(BODY_PREVIEW_LEN + 10);
        assert_eq!(preview(&long).chars().count(), BODY_PREVIEW_LEN);
    }

    #[test]
    fn default_transport_builds() {
        TransportConfig::default()
            .build_client_with_headers(HeaderMap::new())
            .unwrap();
    }
}
