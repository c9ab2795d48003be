use thiserror::Error;

/// Top-level error type for the `wvp-bridge-api` crate.
///
/// Covers transport-level failures only. A well-formed response whose
/// body reports a non-success `code` is *not* an error here -- it is
/// returned as data so the caller can decide what a business-level
/// rejection means. `wvp-bridge-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request aborted through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-2xx HTTP status. `body` is truncated for logging.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The tenant voucher does not name a reachable WVP server.
    #[error("Invalid voucher server '{server}': {message}")]
    InvalidVoucher { server: String, message: String },

    /// A credential could not be encoded as a header value.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
