use std::fmt;

use md5::{Digest, Md5};

use wvp_bridge_api::Voucher;

/// Key under which a voucher is cached.
///
/// Either derived from the voucher's own contents (so the same voucher
/// always lands on the same key) or from a host-issued service-access id.
/// The digest only needs to spread keys, not resist attackers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    const VOUCHER_PREFIX: &'static str = "wvp:voucher:";
    const SERVICE_ACCESS_PREFIX: &'static str = "wvp:service_access:";

    /// `wvp:voucher:<md5(server|port|apiToken)>`
    pub fn for_voucher(voucher: &Voucher) -> Self {
        let canonical = format!("{}|{}|{}", voucher.server, voucher.port, voucher.api_token);
        let digest = Md5::digest(canonical.as_bytes());
        Self(format!("{}{digest:x}", Self::VOUCHER_PREFIX))
    }

    /// `wvp:service_access:<id>`
    pub fn for_service_access(service_access_id: &str) -> Self {
        Self(format!("{}{service_access_id}", Self::SERVICE_ACCESS_PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_voucher_same_key() {
        let a = Voucher::new("10.0.0.5", 18080, "tok");
        let b = Voucher::new("10.0.0.5", 18080, "tok");
        assert_eq!(CacheKey::for_voucher(&a), CacheKey::for_voucher(&b));
    }

    #[test]
    fn any_field_changes_the_key() {
        let base = Voucher::new("10.0.0.5", 18080, "tok");
        let keys = [
            CacheKey::for_voucher(&base),
            CacheKey::for_voucher(&Voucher::new("10.0.0.6", 18080, "tok")),
            CacheKey::for_voucher(&Voucher::new("10.0.0.5", 18081, "tok")),
            CacheKey::for_voucher(&Voucher::new("10.0.0.5", 18080, "tok2")),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn voucher_key_is_prefixed_hex_digest() {
        let key = CacheKey::for_voucher(&Voucher::default());
        let hex = key.as_str().strip_prefix("wvp:voucher:").unwrap_or_default();
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn service_access_key() {
        assert_eq!(
            CacheKey::for_service_access("sa-1").to_string(),
            "wvp:service_access:sa-1"
        );
    }
}
