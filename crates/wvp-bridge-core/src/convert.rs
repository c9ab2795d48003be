// ── API-to-domain conversions ──
//
// Projects raw WVP device pages into the host's device-item shape.

use wvp_bridge_api::wvp::{DevicePage, WvpDevice};

use crate::model::{DeviceItem, DeviceListResult, DeviceNumberTemplate};

const STATUS_ONLINE: &str = "设备状态:在线";
const STATUS_OFFLINE: &str = "设备状态:离线";

/// Localized one-line summary of a device's online flag.
pub fn status_description(online: bool) -> &'static str {
    if online { STATUS_ONLINE } else { STATUS_OFFLINE }
}

impl DeviceItem {
    pub fn from_wvp(device: &WvpDevice, template: &DeviceNumberTemplate) -> Self {
        // Unnamed GB28181 devices show up with an empty name; the id is the
        // only thing a user can recognise them by.
        let device_name = device
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&device.device_id)
            .to_owned();

        Self {
            device_number: template.render(&device.device_id),
            device_name,
            description: status_description(device.on_line).to_owned(),
        }
    }
}

/// Translate one WVP page. `total` is the remote total across all pages,
/// not the length of this page.
pub fn translate_device_page(page: &DevicePage, template: &DeviceNumberTemplate) -> DeviceListResult {
    DeviceListResult {
        total: page.total,
        list: page
            .list
            .iter()
            .map(|d| DeviceItem::from_wvp(d, template))
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(json: &str) -> DevicePage {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn translates_every_record() {
        let p = page(
            r#"{"total":42,"list":[
                {"deviceId":"34020000001320000001","name":"Gate","onLine":true},
                {"deviceId":"34020000001320000002","name":"Yard","onLine":false}
            ]}"#,
        );
        let out = translate_device_page(&p, &DeviceNumberTemplate::new("wvp_%s"));

        assert_eq!(out.total, 42);
        assert_eq!(
            out.list,
            vec![
                DeviceItem {
                    device_number: "wvp_34020000001320000001".into(),
                    device_name: "Gate".into(),
                    description: STATUS_ONLINE.into(),
                },
                DeviceItem {
                    device_number: "wvp_34020000001320000002".into(),
                    device_name: "Yard".into(),
                    description: STATUS_OFFLINE.into(),
                },
            ]
        );
    }

    #[test]
    fn unnamed_device_uses_id() {
        let p = page(r#"{"total":1,"list":[{"deviceId":"3402","name":"  "}]}"#);
        let out = translate_device_page(&p, &DeviceNumberTemplate::default());
        assert_eq!(out.list[0].device_name, "3402");
        assert_eq!(out.list[0].device_number, "3402");
    }

    #[test]
    fn empty_page() {
        let out = translate_device_page(&DevicePage::default(), &DeviceNumberTemplate::default());
        assert_eq!(out, DeviceListResult::default());
    }
}
