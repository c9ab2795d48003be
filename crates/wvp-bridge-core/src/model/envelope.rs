use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Uniform response body of every callback.
///
/// Success: `{"code":200,"message":"success","data":...}` (`data` may be `null`).
/// Failure: `{"code":400,"message":"<error>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    pub const SUCCESS: u16 = 200;
    pub const FAILURE: u16 = 400;

    pub fn success(data: Value) -> Self {
        Self {
            code: Self::SUCCESS,
            message: "success".into(),
            data: Some(data),
        }
    }

    pub fn failure(err: &CoreError) -> Self {
        Self {
            code: Self::FAILURE,
            message: err.to_string(),
            data: None,
        }
    }

    /// Wrap a handler result, serializing the success payload.
    pub fn from_result<T: Serialize>(result: Result<T, CoreError>) -> Self {
        match result.and_then(|data| serde_json::to_value(data).map_err(CoreError::from)) {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_with_null_keeps_data_key() {
        let body = serde_json::to_value(Envelope::from_result(Ok(()))).unwrap();
        assert_eq!(body, json!({ "code": 200, "message": "success", "data": null }));
    }

    #[test]
    fn failure_omits_data() {
        let err = CoreError::UnsupportedFormType {
            form_type: "XYZ".into(),
        };
        let body = serde_json::to_value(Envelope::from_result::<()>(Err(err))).unwrap();
        assert_eq!(
            body,
            json!({ "code": 400, "message": "not support form type: XYZ" })
        );
    }
}
