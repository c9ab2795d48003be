//! HTTP binding of the host callback contract.
//!
//! Every route answers HTTP 200 with an [`Envelope`]; success and failure
//! are distinguished by the envelope's `code`, never by the status line.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

use wvp_bridge_core::{CallbackHandler, CoreError, DeviceListRequest, Envelope};

pub type SharedHandler = Arc<dyn CallbackHandler>;

pub fn router(handler: SharedHandler) -> Router {
    Router::new()
        .route("/api/v1/form/config", get(form_config))
        .route(
            "/api/v1/plugin/device/list",
            get(device_list).post(device_list),
        )
        .route(
            "/api/v1/device/disconnect",
            get(disconnect_device).post(disconnect_device),
        )
        .route("/api/v1/notify/event", post(notify_event))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

// ── Handlers ────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct FormConfigQuery {
    #[serde(default)]
    form_type: String,
}

async fn form_config(
    State(handler): State<SharedHandler>,
    query: Result<Query<FormConfigQuery>, QueryRejection>,
) -> Json<Envelope> {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return rejected(&rejection.body_text()),
    };
    Json(Envelope::from_result(handler.get_form(&query.form_type).await))
}

async fn device_list(
    State(handler): State<SharedHandler>,
    form: Result<Form<DeviceListRequest>, FormRejection>,
) -> Json<Envelope> {
    let Form(request) = match form {
        Ok(f) => f,
        Err(rejection) => return rejected(&rejection.body_text()),
    };
    Json(Envelope::from_result(handler.get_device_list(request).await))
}

async fn disconnect_device(
    State(handler): State<SharedHandler>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Json<Envelope> {
    let Form(params) = match form {
        Ok(f) => f,
        Err(rejection) => return rejected(&rejection.body_text()),
    };
    Json(Envelope::from_result(handler.disconnect_device(&params).await))
}

async fn notify_event(State(handler): State<SharedHandler>, body: Bytes) -> Json<Envelope> {
    Json(Envelope::from_result(handler.notify_event(&body).await))
}

async fn healthz() -> &'static str {
    "ok"
}

fn rejected(reason: &str) -> Json<Envelope> {
    warn!(%reason, "request rejected before reaching the handler");
    Json(Envelope::failure(&CoreError::Decode {
        message: reason.to_owned(),
    }))
}
