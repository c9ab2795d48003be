// In-process voucher backend.
//
// Lock-free concurrent storage via `DashMap`. Suitable for a single
// bridge instance; multi-instance deployments plug a shared store in
// through `VoucherStore`.

use async_trait::async_trait;
use dashmap::DashMap;

use super::VoucherStore;
use crate::error::CoreError;

#[derive(Debug, Default)]
pub struct MemoryVoucherStore {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryVoucherStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl VoucherStore for MemoryVoucherStore {
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }
}
