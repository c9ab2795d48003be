// ── Inbound notification payloads ──

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Event envelope the host posts to the notify callback.
///
/// Only `message_type` is interpreted here. `message` is itself a JSON
/// string whose shape depends on the type; any extra envelope fields are
/// kept as-is in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyEvent {
    #[serde(default)]
    pub message_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Classified `message_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyKind {
    /// `"1"` -- a service access point's configuration changed.
    ConfigChanged,
    Unsupported(String),
}

/// Body of a [`NotifyKind::ConfigChanged`] message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigChanged {
    pub service_access_id: String,
}

impl NotifyEvent {
    pub const CONFIG_CHANGED: &'static str = "1";

    pub fn parse(body: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn kind(&self) -> NotifyKind {
        match self.message_type.as_str() {
            Self::CONFIG_CHANGED => NotifyKind::ConfigChanged,
            other => NotifyKind::Unsupported(other.to_owned()),
        }
    }

    /// Decode `message` as a configuration-changed body.
    pub fn config_changed(&self) -> Result<ConfigChanged, CoreError> {
        Ok(serde_json::from_str(&self.message)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn classifies_config_changed() {
        let ev = NotifyEvent::parse(
            br#"{"message_type":"1","message":"{\"service_access_id\":\"abc\"}"}"#,
        )
        .unwrap();
        assert_eq!(ev.kind(), NotifyKind::ConfigChanged);
        assert_eq!(ev.config_changed().unwrap().service_access_id, "abc");
    }

    #[test]
    fn other_types_are_unsupported() {
        let ev = NotifyEvent::parse(br#"{"message_type":"7","message":""}"#).unwrap();
        assert_eq!(ev.kind(), NotifyKind::Unsupported("7".into()));
    }

    #[test]
    fn extra_fields_are_kept() {
        let ev = NotifyEvent::parse(br#"{"message_type":"2","message":"x","ts":17}"#).unwrap();
        assert_eq!(ev.extra["ts"], 17);
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(
            NotifyEvent::parse(b"not json"),
            Err(CoreError::Decode { .. })
        ));
    }

    #[test]
    fn malformed_inner_message_is_decode_error() {
        let ev = NotifyEvent::parse(br#"{"message_type":"1","message":"{"}"#).unwrap();
        assert!(matches!(
            ev.config_changed(),
            Err(CoreError::Decode { .. })
        ));
    }
}
