// Host platform plugin API
//
// The device-management host exposes a small API to its plugins. The
// bridge only needs service-access resolution, wrapped in the host's
// `{ code, message, data }` envelope where `code == 200` means success.

pub mod client;
pub mod models;

pub use client::{PlatformClient, PlatformSettings};
pub use models::{AccessPoint, PlatformResponse};
