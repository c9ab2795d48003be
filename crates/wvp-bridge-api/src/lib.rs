// wvp-bridge-api: Async HTTP clients for the WVP video platform and the host plugin API

pub mod auth;
pub mod error;
pub mod platform;
pub mod transport;
pub mod wvp;

pub use auth::Voucher;
pub use error::Error;
pub use platform::{PlatformClient, PlatformSettings};
pub use transport::{TlsMode, TransportConfig};
pub use wvp::{WvpClient, WvpSettings};
