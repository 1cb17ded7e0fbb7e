//! Records returned by the device directory endpoint.
//!
//! Field names follow the wire format so that records can be printed back
//! out unchanged. Missing or `null` fields decode to their defaults.

use serde::{Deserialize, Deserializer, Serialize};

/// A device group, which in practice is a building or site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Group {
    pub group_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub group_name: String,
    pub organization_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub devices: Vec<Device>,
}

/// An individual AirTame device snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    pub screenshot_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub settings_state: String,
    pub id: i64,
    pub ap24_enabled: bool,
    pub ap24_channel: i64,
    pub ap52_enabled: bool,
    pub ap52_channel: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub background_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_name: String,
    pub last_seen: i64,
    pub last_connected: i64,
    pub is_online: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub network_state: NetworkState,
    pub update_available: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub update_channel: String,
    pub update_progress: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub homescreen_orientation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkState {
    pub online: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub interfaces: Vec<NetworkInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkInterface {
    pub frequency: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mac: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub signal_strength: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ssid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
}

impl Device {
    /// A device carrying only its ID, enough to address it in a command.
    pub fn hollow(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Whether the device's network state reports it online. This is the
    /// flag bulk operations filter on, not the top-level `isOnline`.
    pub fn reports_online(&self) -> bool {
        self.network_state.online
    }
}

/// Concatenate every group's devices, keeping group order and the order
/// within each group. Duplicate IDs are kept.
pub fn flatten_groups(groups: Vec<Group>) -> Vec<Device> {
    groups.into_iter().flat_map(|group| group.devices).collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn group(id: i64, device_ids: &[i64]) -> Group {
        Group {
            group_id: id,
            group_name: format!("Building {}", id),
            organization_id: 1,
            devices: device_ids.iter().copied().map(Device::hollow).collect(),
        }
    }

    #[test]
    fn test_flatten_preserves_group_and_device_order() {
        let devices = flatten_groups(vec![group(1, &[10, 11]), group(2, &[20, 21, 22])]);
        let ids: Vec<i64> = devices.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![10, 11, 20, 21, 22]);
    }

    #[test]
    fn test_flatten_keeps_duplicates_and_empty_groups() {
        let devices = flatten_groups(vec![group(1, &[5]), group(2, &[]), group(3, &[5])]);
        let ids: Vec<i64> = devices.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![5, 5]);
        assert!(flatten_groups(Vec::new()).is_empty());
    }

    #[test]
    fn test_hollow_device_only_sets_id() {
        let device = Device::hollow(42);
        assert_eq!(device.id, 42);
        assert_eq!(Device { id: 0, ..device }, Device::default());
    }

    #[test]
    fn test_decode_full_device() {
        let device: Device = serde_json::from_value(json!({
            "platform": "airtame2",
            "version": "4.6.1",
            "state": "idle",
            "screenshotEnabled": true,
            "settingsState": "synced",
            "id": 1234,
            "ap24Enabled": false,
            "ap24Channel": 6,
            "ap52Enabled": true,
            "ap52Channel": 36,
            "backgroundType": "default",
            "deviceName": "Room 101",
            "lastSeen": 1700000000,
            "lastConnected": 1699990000,
            "isOnline": true,
            "networkState": {
                "online": true,
                "interfaces": [{
                    "frequency": 5180,
                    "ip": "10.0.0.12",
                    "mac": "aa:bb:cc:dd:ee:ff",
                    "mode": "client",
                    "name": "wlan0",
                    "signal_strength": -48,
                    "ssid": "campus",
                    "status": "connected",
                    "type": "wifi"
                }]
            },
            "updateAvailable": false,
            "updateChannel": "stable",
            "updateProgress": 0,
            "homescreenOrientation": "landscape"
        }))
        .unwrap();

        assert_eq!(device.id, 1234);
        assert_eq!(device.device_name, "Room 101");
        assert!(device.reports_online());
        assert_eq!(device.network_state.interfaces[0].kind, "wifi");
        assert_eq!(device.network_state.interfaces[0].signal_strength, -48);
    }

    #[test]
    fn test_decode_tolerates_missing_and_null_fields() {
        let group: Group = serde_json::from_value(json!({
            "groupId": 3,
            "groupName": null,
            "devices": [
                { "id": 7, "deviceName": null, "networkState": null },
                { "id": 8, "networkState": { "online": true, "interfaces": null } }
            ]
        }))
        .unwrap();

        assert_eq!(group.group_name, "");
        assert_eq!(group.organization_id, 0);
        assert_eq!(group.devices.len(), 2);
        assert!(!group.devices[0].reports_online());
        assert!(group.devices[1].reports_online());
        assert!(group.devices[1].network_state.interfaces.is_empty());
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let value = serde_json::to_value(Device::hollow(9)).unwrap();
        assert_eq!(value["id"], 9);
        assert_eq!(value["deviceName"], "");
        assert_eq!(value["networkState"]["online"], false);
        assert!(value.get("device_name").is_none());
    }
}
