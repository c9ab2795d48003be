// ── Notification dispatch ──
//
// Routes host notifications by `message_type`. The host only wants a fast
// acknowledgement, so nothing on this path is reported back: every failure
// ends in a log line and a `DispatchOutcome::Dropped`.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use wvp_bridge_api::platform::AccessPoint;
use wvp_bridge_api::{PlatformClient, Voucher};

use crate::error::CoreError;
use crate::model::{CacheKey, NotifyEvent, NotifyKind};
use crate::publish::{PropertySink, PropertyUpdate};
use crate::store::VoucherCache;

/// What became of one notification. For logs and tests only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The access point was resolved and handed to the sink.
    Forwarded { service_access_id: String },
    /// Recognized, but a step failed. Already logged.
    Dropped { reason: String },
    /// `message_type` the bridge does not handle.
    Unsupported { message_type: String },
}

/// Stateless classifier for inbound notifications.
pub struct NotificationDispatcher {
    platform: Arc<PlatformClient>,
    cache: VoucherCache,
    sink: Arc<dyn PropertySink>,
    timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(
        platform: Arc<PlatformClient>,
        cache: VoucherCache,
        sink: Arc<dyn PropertySink>,
        timeout: Duration,
    ) -> Self {
        Self {
            platform,
            cache,
            sink,
            timeout,
        }
    }

    pub async fn dispatch(&self, cancel: &CancellationToken, event: &NotifyEvent) -> DispatchOutcome {
        match event.kind() {
            NotifyKind::ConfigChanged => match self.on_config_changed(cancel, event).await {
                Ok(service_access_id) => DispatchOutcome::Forwarded { service_access_id },
                Err(e) => {
                    warn!(error = %e, "config-changed notification dropped");
                    DispatchOutcome::Dropped {
                        reason: e.to_string(),
                    }
                }
            },
            NotifyKind::Unsupported(message_type) => {
                warn!(%message_type, "unsupported message_type");
                DispatchOutcome::Unsupported { message_type }
            }
        }
    }

    async fn on_config_changed(
        &self,
        cancel: &CancellationToken,
        event: &NotifyEvent,
    ) -> Result<String, CoreError> {
        let body = event.config_changed()?;
        let access_point = self.resolve_access_point(cancel, &body.service_access_id).await?;
        info!(service_access_id = %body.service_access_id, "service access point resolved");

        self.remember_voucher(&body.service_access_id, &access_point)
            .await;

        self.sink
            .publish(PropertyUpdate {
                service_access_id: body.service_access_id.clone(),
                access_point,
            })
            .await?;
        Ok(body.service_access_id)
    }

    /// One lookup, bounded by the configured timeout. No retries.
    async fn resolve_access_point(
        &self,
        cancel: &CancellationToken,
        service_access_id: &str,
    ) -> Result<AccessPoint, CoreError> {
        let lookup = self.platform.get_service_access(cancel, service_access_id);
        let resp = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| CoreError::Timeout {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })??;

        if !resp.is_success() {
            return Err(CoreError::Remote {
                message: resp.message,
                code: Some(resp.code),
            });
        }
        Ok(resp.data.unwrap_or_default())
    }

    /// Cache the voucher embedded in the access point under its service
    /// access id. Best-effort.
    async fn remember_voucher(&self, service_access_id: &str, access_point: &AccessPoint) {
        let Some(raw) = access_point.voucher.as_deref().filter(|v| !v.is_empty()) else {
            debug!(%service_access_id, "access point carries no voucher");
            return;
        };

        let voucher = match Voucher::from_bytes(raw.as_bytes()) {
            Ok(v) => v,
            Err(e) => {
                warn!(%service_access_id, error = %e, "access point voucher is not valid JSON");
                return;
            }
        };

        let key = CacheKey::for_service_access(service_access_id);
        if let Err(e) = self.cache.put(&key, &voucher).await {
            warn!(%key, error = %e, "failed to cache access point voucher");
        }
    }
}
