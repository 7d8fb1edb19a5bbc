//! DNA Center record types
//!
//! Fields are kept as sent by the controller. Missing values deserialize to
//! `None` and serialize as `"N/A"` so templates never see holes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder for a missing field
pub const NOT_AVAILABLE: &str = "N/A";

/// Network device as listed by `/api/v1/network-device`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// Controller-internal device identifier
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", serialize_with = "or_not_available")]
    pub hostname: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", serialize_with = "or_not_available")]
    pub management_ip_address: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", serialize_with = "or_not_available")]
    pub platform_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", serialize_with = "or_not_available")]
    pub reachability_status: Option<String>,
}

impl DeviceRecord {
    pub fn hostname(&self) -> &str {
        display(&self.hostname)
    }

    pub fn management_ip(&self) -> &str {
        display(&self.management_ip_address)
    }

    pub fn platform(&self) -> &str {
        display(&self.platform_id)
    }

    pub fn reachability(&self) -> &str {
        display(&self.reachability_status)
    }

    /// Exact match on the management IP; a device without one never matches
    pub fn has_management_ip(&self, ip: &str) -> bool {
        self.management_ip_address.as_deref() == Some(ip)
    }
}

/// Interface as listed by `/api/v1/interface`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceRecord {
    #[serde(default, deserialize_with = "lenient_text", serialize_with = "or_not_available")]
    pub port_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", serialize_with = "or_not_available")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", serialize_with = "or_not_available")]
    pub vlan_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", serialize_with = "or_not_available")]
    pub speed: Option<String>,
}

impl InterfaceRecord {
    pub fn port_name(&self) -> &str {
        display(&self.port_name)
    }

    pub fn status(&self) -> &str {
        display(&self.status)
    }

    pub fn vlan(&self) -> &str {
        display(&self.vlan_id)
    }

    pub fn speed(&self) -> &str {
        display(&self.speed)
    }
}

/// `{"response": [...]}` wrapper used by the list endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub response: Vec<T>,
}

/// Body of the token endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(rename = "Token")]
    pub token: Option<String>,
}

fn display(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Accept strings, numbers and booleans as text; null becomes `None`
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

fn or_not_available<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(display(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_from_controller_json() {
        let device: DeviceRecord = serde_json::from_value(json!({
            "hostname": "cat_9k_1",
            "managementIpAddress": "10.10.20.81",
            "platformId": "C9300-24U",
            "reachabilityStatus": "Reachable",
            "id": "f0cb8464-1ce7-4afe-9c0d-a4b0cc5ee84c",
            "serialNumber": "FCW2136L0AK"
        }))
        .unwrap();

        assert_eq!(device.hostname(), "cat_9k_1");
        assert_eq!(device.management_ip(), "10.10.20.81");
        assert_eq!(device.id.as_deref(), Some("f0cb8464-1ce7-4afe-9c0d-a4b0cc5ee84c"));
        assert!(device.has_management_ip("10.10.20.81"));
        assert!(!device.has_management_ip("10.10.20.8"));
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let device: DeviceRecord = serde_json::from_value(json!({ "hostname": null })).unwrap();
        assert_eq!(device.hostname(), NOT_AVAILABLE);
        assert_eq!(device.platform(), NOT_AVAILABLE);
        assert!(device.id.is_none());

        // The fallback is display-only
        assert!(!device.has_management_ip(NOT_AVAILABLE));

        let rendered = serde_json::to_value(&device).unwrap();
        assert_eq!(rendered["hostname"], "N/A");
        assert_eq!(rendered["reachabilityStatus"], "N/A");
        assert!(rendered["id"].is_null());
    }

    #[test]
    fn test_interface_numeric_fields() {
        let interface: InterfaceRecord = serde_json::from_value(json!({
            "portName": "GigabitEthernet1/0/1",
            "status": "up",
            "vlanId": 1,
            "speed": "1000000"
        }))
        .unwrap();

        assert_eq!(interface.port_name(), "GigabitEthernet1/0/1");
        assert_eq!(interface.vlan(), "1");
        assert_eq!(interface.speed(), "1000000");
    }

    #[test]
    fn test_list_response_without_body() {
        let list: ListResponse<DeviceRecord> = serde_json::from_value(json!({ "version": "1.0" })).unwrap();
        assert!(list.response.is_empty());
    }

    /// Payload type without `Default`, as used by the generic list fetch
    #[derive(Debug, Deserialize)]
    struct Bare {
        name: String,
    }

    fn decode_list<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Vec<T> {
        serde_json::from_value::<ListResponse<T>>(value).unwrap().response
    }

    #[test]
    fn test_list_response_needs_no_default_payload() {
        let items: Vec<Bare> = decode_list(json!({ "response": [{ "name": "a" }, { "name": "b" }] }));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "b");

        let empty: Vec<Bare> = decode_list(json!({}));
        assert!(empty.is_empty());
    }
}
