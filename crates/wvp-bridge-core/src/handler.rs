// ── Callback handler ──
//
// The four operations the host registers by name. The binary binds a
// `CallbackHandler` to HTTP routes; `Bridge` is the real implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use wvp_bridge_api::{PlatformClient, Voucher, WvpClient};

use crate::config::BridgeConfig;
use crate::convert::translate_device_page;
use crate::dispatch::{DispatchOutcome, NotificationDispatcher};
use crate::error::CoreError;
use crate::form::load_form;
use crate::model::{CacheKey, DeviceListResult, FormType, NotifyEvent, PageRequest};
use crate::publish::PropertySink;
use crate::store::{VoucherCache, VoucherStore};

/// Raw form fields of the device-list callback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceListRequest {
    #[serde(default)]
    pub voucher: String,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
}

/// Host callback contract: `OnGetForm`, `GetDeviceList`,
/// `OnDisconnectDevice`, `OnNotifyEvent`.
#[async_trait]
pub trait CallbackHandler: Send + Sync {
    /// Form descriptor for `form_type`; `Ok(None)` renders as `null`.
    async fn get_form(&self, form_type: &str) -> Result<Option<Value>, CoreError>;

    async fn get_device_list(
        &self,
        request: DeviceListRequest,
    ) -> Result<DeviceListResult, CoreError>;

    async fn disconnect_device(&self, params: &HashMap<String, String>) -> Result<(), CoreError>;

    /// Fails only when `body` itself is not a notification envelope.
    async fn notify_event(&self, body: &[u8]) -> Result<(), CoreError>;
}

/// Voucher-scoped bridge between the host and WVP.
///
/// Built once at startup; every collaborator is injected and read-only
/// afterwards except the voucher cache.
pub struct Bridge {
    config: BridgeConfig,
    cache: VoucherCache,
    dispatcher: NotificationDispatcher,
    cancel: CancellationToken,
}

impl Bridge {
    pub fn new(
        config: BridgeConfig,
        platform: PlatformClient,
        store: Arc<dyn VoucherStore>,
        sink: Arc<dyn PropertySink>,
    ) -> Self {
        let cache = VoucherCache::new(store);
        let dispatcher = NotificationDispatcher::new(
            Arc::new(platform),
            cache.clone(),
            sink,
            config.access_point_timeout,
        );
        Self {
            config,
            cache,
            dispatcher,
            cancel: CancellationToken::new(),
        }
    }

    /// Abort in-flight remote calls when `cancel` fires (process shutdown).
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cache(&self) -> &VoucherCache {
        &self.cache
    }

    /// Dispatch an already-decoded notification. Exposed for callers that
    /// want the outcome; the host callback discards it.
    pub async fn dispatch(&self, event: &NotifyEvent) -> DispatchOutcome {
        self.dispatcher.dispatch(&self.cancel, event).await
    }
}

#[async_trait]
impl CallbackHandler for Bridge {
    async fn get_form(&self, form_type: &str) -> Result<Option<Value>, CoreError> {
        info!(form_type, "OnGetForm");

        match form_type.parse::<FormType>()? {
            FormType::Voucher => Ok(None),
            FormType::ServiceVoucher => Ok(load_form(&self.config.svcr_form_path).await),
            FormType::Config => Err(CoreError::UnsupportedFormType {
                form_type: form_type.to_owned(),
            }),
        }
    }

    async fn get_device_list(
        &self,
        request: DeviceListRequest,
    ) -> Result<DeviceListResult, CoreError> {
        info!(
            page = ?request.page,
            page_size = ?request.page_size,
            "GetDeviceList"
        );

        let voucher: Voucher = serde_json::from_str(&request.voucher)?;
        let paging =
            PageRequest::from_params(request.page.as_deref(), request.page_size.as_deref());
        debug!(?voucher, ?paging, "resolved device-list request");

        let client = WvpClient::from_voucher(&voucher, &self.config.wvp, &self.config.transport)?;
        let resp = client
            .list_devices(&self.cancel, paging.page, paging.page_size)
            .await?;

        if !resp.is_success() {
            return Err(CoreError::Remote {
                message: resp.message(),
                code: Some(resp.code),
            });
        }

        let page = resp.data.unwrap_or_default();
        let result = translate_device_page(&page, &self.config.device_number_template);

        // Detached: the response never waits on the cache.
        drop(
            self.cache
                .spawn_put(CacheKey::for_voucher(&voucher), voucher),
        );

        Ok(result)
    }

    async fn disconnect_device(&self, params: &HashMap<String, String>) -> Result<(), CoreError> {
        info!(?params, "OnDisconnectDevice");
        Ok(())
    }

    async fn notify_event(&self, body: &[u8]) -> Result<(), CoreError> {
        info!(body = %String::from_utf8_lossy(body), "OnNotifyEvent");

        let event = NotifyEvent::parse(body)?;
        let outcome = self.dispatch(&event).await;
        debug!(?outcome, "notification dispatched");
        Ok(())
    }
}
