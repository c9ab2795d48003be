// ── Domain model ──
//
// Host-facing shapes and inbound payloads. Nothing here is persisted
// except `Voucher` (re-exported from the API crate), which the cache stores.

pub mod cache_key;
pub mod device;
pub mod envelope;
pub mod form;
pub mod notify;
pub mod paging;

pub use cache_key::CacheKey;
pub use device::{DeviceItem, DeviceListResult, DeviceNumberTemplate};
pub use envelope::Envelope;
pub use form::FormType;
pub use notify::{ConfigChanged, NotifyEvent, NotifyKind};
pub use paging::PageRequest;
