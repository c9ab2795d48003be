// ── Core error types ──
//
// Errors the bridge reports back to the host through the response
// envelope. `Display` is what the host sees as `message`, so remote
// rejections render as the remote text verbatim.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    /// Malformed JSON in a voucher or notification payload.
    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("not support form type: {form_type}")]
    UnsupportedFormType { form_type: String },

    // ── Remote errors ────────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// A bridge-side deadline expired before the remote call finished.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Request cancelled")]
    Cancelled,

    /// The remote side answered with a non-success status code.
    #[error("{message}")]
    Remote { message: String, code: Option<i64> },

    /// Any other failed exchange with a remote API.
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Local collaborators ──────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Publish error: {message}")]
    Publish { message: String },
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wvp_bridge_api::Error> for CoreError {
    fn from(err: wvp_bridge_api::Error) -> Self {
        use wvp_bridge_api::Error as ApiError;

        match err {
            ApiError::Transport(ref e) => {
                // The client's own deadline carries no duration; report it
                // as a failed connection with reqwest's reason.
                if e.is_timeout() || e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::Cancelled => CoreError::Cancelled,
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::InvalidVoucher { .. } => CoreError::Api {
                message: err.to_string(),
                status: None,
            },
            ApiError::InvalidHeader { name, message } => CoreError::Config {
                message: format!("Invalid header {name}: {message}"),
            },
            ApiError::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::Http { status, body } => CoreError::Api {
                message: format!("HTTP {status}: {body}"),
                status: Some(status),
            },
            ApiError::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response: {message}"),
                status: None,
            },
        }
    }
}
