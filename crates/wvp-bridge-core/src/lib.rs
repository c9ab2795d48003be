//! Bridge logic between the ThingsPanel plugin contract and a WVP platform.
//!
//! This crate owns the domain model and the request handling behind the
//! four callbacks the host registers:
//!
//! - **[`Bridge`]**: the [`CallbackHandler`] implementation. Resolves a
//!   tenant's voucher into a [`WvpClient`](wvp_bridge_api::WvpClient),
//!   translates the remote device page into host [`DeviceItem`]s, and
//!   stores the voucher in the background so later notifications can find it.
//!
//! - **[`NotificationDispatcher`]** classifies inbound [`NotifyEvent`]s by
//!   `message_type`. Configuration-changed events trigger a service-access
//!   lookup whose result is forwarded to a [`PropertySink`]. Everything on
//!   this path is logged, never surfaced to the host.
//!
//! - **[`VoucherCache`]**: typed access to any [`VoucherStore`] backend,
//!   keyed by [`CacheKey`]. [`MemoryVoucherStore`] is the in-process default.
//!
//! - **Domain model** ([`model`]): host-facing shapes (`DeviceItem`,
//!   `DeviceListResult`, `Envelope`) and inbound payloads (`NotifyEvent`).

pub mod config;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod handler;
pub mod model;
pub mod publish;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::BridgeConfig;
pub use dispatch::{DispatchOutcome, NotificationDispatcher};
pub use error::CoreError;
pub use handler::{Bridge, CallbackHandler, DeviceListRequest};
pub use publish::{ChannelSink, LogSink, PropertySink, PropertyUpdate};
pub use store::{MemoryVoucherStore, VoucherCache, VoucherStore};

pub use model::{
    CacheKey, ConfigChanged, DeviceItem, DeviceListResult, DeviceNumberTemplate, Envelope,
    FormType, NotifyEvent, NotifyKind, PageRequest,
};
pub use wvp_bridge_api::Voucher;
