// ── Device domain types ──

use serde::{Deserialize, Serialize};

/// One device as the host's device picker shows it.
///
/// A read-only projection of a WVP device record, built per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceItem {
    pub device_number: String,
    pub device_name: String,
    pub description: String,
}

/// Response payload of the device-list callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceListResult {
    pub total: u64,
    pub list: Vec<DeviceItem>,
}

/// Template turning a WVP device id into the host's device number.
///
/// `%s` or `{}` marks where the id goes (first occurrence only). A template
/// with neither gets the id appended, so a bare prefix like `wvp_` works too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceNumberTemplate(String);

impl DeviceNumberTemplate {
    const PLACEHOLDERS: [&'static str; 2] = ["%s", "{}"];

    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn render(&self, device_id: &str) -> String {
        let first = Self::PLACEHOLDERS
            .iter()
            .filter_map(|p| self.0.find(p).map(|idx| (idx, p.len())))
            .min_by_key(|(idx, _)| *idx);

        match first {
            Some((idx, len)) => {
                let mut out = String::with_capacity(self.0.len() + device_id.len());
                out.push_str(&self.0[..idx]);
                out.push_str(device_id);
                out.push_str(&self.0[idx + len..]);
                out
            }
            None => format!("{}{device_id}", self.0),
        }
    }
}

impl Default for DeviceNumberTemplate {
    fn default() -> Self {
        Self::new("%s")
    }
}
