// WVP platform API
//
// Hand-written client for the WVP (GB28181) management API. Responses
// use the `{ code, msg, data }` envelope where `code == 0` means success.

pub mod client;
pub mod models;

pub use client::{WvpClient, WvpSettings};
pub use models::{DevicePage, WvpDevice, WvpResponse};
