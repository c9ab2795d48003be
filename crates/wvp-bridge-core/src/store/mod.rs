// ── Voucher cache ──
//
// Typed voucher access over any byte-oriented key/value backend. The
// bridge writes vouchers here off the request path so that later,
// credential-less notifications can recover them.

mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use wvp_bridge_api::Voucher;

use crate::error::CoreError;
use crate::model::CacheKey;

pub use memory::MemoryVoucherStore;

/// Byte-level key/value backend.
///
/// Implementations must tolerate concurrent writers; for the same key the
/// last write wins. A missing key is `Ok(None)`, not an error.
#[async_trait]
pub trait VoucherStore: Send + Sync {
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CoreError>;

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError>;
}

/// Voucher (de)serialization on top of a [`VoucherStore`].
///
/// Cheap to clone; all clones share the same backend.
#[derive(Clone)]
pub struct VoucherCache {
    store: Arc<dyn VoucherStore>,
}

impl VoucherCache {
    pub fn new(store: Arc<dyn VoucherStore>) -> Self {
        Self { store }
    }

    /// Store `voucher` under `key`, overwriting any previous value.
    pub async fn put(&self, key: &CacheKey, voucher: &Voucher) -> Result<(), CoreError> {
        let bytes = voucher.to_bytes().map_err(|e| CoreError::Cache {
            message: format!("failed to encode voucher: {e}"),
        })?;
        self.store.set(key.as_str(), bytes).await?;
        debug!(%key, "voucher cached");
        Ok(())
    }

    pub async fn get(&self, key: &CacheKey) -> Result<Option<Voucher>, CoreError> {
        let Some(bytes) = self.store.get(key.as_str()).await? else {
            return Ok(None);
        };
        Voucher::from_bytes(&bytes)
            .map(Some)
            .map_err(|e| CoreError::Decode {
                message: format!("cached voucher under {key} is corrupt: {e}"),
            })
    }

    /// Fire-and-forget [`put`](Self::put) on a background task.
    ///
    /// The outcome only shows up in logs. The handle is returned for tests;
    /// request handlers drop it.
    pub fn spawn_put(&self, key: CacheKey, voucher: Voucher) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.put(&key, &voucher).await {
                warn!(%key, error = %e, "background voucher write failed");
            }
        })
    }
}
