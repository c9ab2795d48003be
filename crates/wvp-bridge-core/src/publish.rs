// ── Downstream property publishing ──
//
// Resolved access points leave the bridge through a `PropertySink`.
// The MQTT publisher lives outside this crate; these two sinks cover
// in-process consumers and log-only deployments.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::info;

use wvp_bridge_api::platform::AccessPoint;

use crate::error::CoreError;

/// A resolved access point, ready for the device-property update path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyUpdate {
    pub service_access_id: String,
    pub access_point: AccessPoint,
}

#[async_trait]
pub trait PropertySink: Send + Sync {
    async fn publish(&self, update: PropertyUpdate) -> Result<(), CoreError>;
}

/// Forwards updates into a bounded `mpsc` channel.
///
/// Never waits for room: a full channel drops the update and reports
/// `CoreError::Publish`, so a stalled consumer cannot hold up the caller.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<PropertyUpdate>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<PropertyUpdate>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl PropertySink for ChannelSink {
    async fn publish(&self, update: PropertyUpdate) -> Result<(), CoreError> {
        self.tx.try_send(update).map_err(|e| match e {
            TrySendError::Full(update) => CoreError::Publish {
                message: format!(
                    "property update channel full; dropped update for {}",
                    update.service_access_id
                ),
            },
            TrySendError::Closed(_) => CoreError::Publish {
                message: "property update receiver dropped".into(),
            },
        })
    }
}

/// Logs each update and drops it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl PropertySink for LogSink {
    async fn publish(&self, update: PropertyUpdate) -> Result<(), CoreError> {
        info!(
            service_access_id = %update.service_access_id,
            fields = update.access_point.extra.len(),
            "access point resolved"
        );
        Ok(())
    }
}
