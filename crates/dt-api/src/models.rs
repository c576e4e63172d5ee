//! Response types of the Disruptive Technologies REST API
//!
//! Field names follow the wire format (`displayName`, `updateTime`, `type`)
//! through serde renames. Fields the API returns but nothing here models are
//! ignored on decode.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level grouping of devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Resource name, e.g. `projects/c0md3mm0c7pet3vgt3fg`
    pub name: String,
    pub display_name: String,
}

/// A sensor or cloud connector inside a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Resource name, e.g. `projects/<project>/devices/<device>`
    pub name: String,
    /// Free-form labels. Keys and values are defined by the remote service.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Device type as reported by the API (`temperature`, `touch`, ...)
    #[serde(rename = "type")]
    pub device_type: String,
}

/// An observation reported by a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Resource name of the device the event concerns
    pub target: String,
    #[serde(default)]
    pub data: EventData,
}

impl Event {
    pub fn temperature(&self) -> Option<&Temperature> {
        self.data.temperature.as_ref()
    }
}

/// Event payload.
///
/// Only temperature readings are modeled. Any other payload decodes to an
/// empty `EventData`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Temperature {
    pub value: f64,
    /// Timestamp exactly as sent by the API
    pub update_time: String,
}

/// A temperature reading with its timestamp parsed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSample {
    pub time: DateTime<Utc>,
    pub value: f64,
}

/// Extract the temperature readings from a batch of events, in input order.
///
/// Events without a temperature payload are skipped. An `updateTime` that is
/// not RFC 3339 fails the whole batch.
pub fn temperature_samples(events: &[Event]) -> crate::Result<Vec<TemperatureSample>> {
    events
        .iter()
        .filter_map(Event::temperature)
        .map(|reading| {
            let time = DateTime::parse_from_rfc3339(&reading.update_time)
                .map_err(|e| {
                    crate::DtApiError::Timestamp(format!("{:?}: {}", reading.update_time, e))
                })?
                .with_timezone(&Utc);
            Ok(TemperatureSample {
                time,
                value: reading.value,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsEnvelope {
    pub projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DevicesEnvelope {
    pub devices: Vec<Device>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventsEnvelope {
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn project_uses_camel_case_display_name() {
        let project: Project =
            serde_json::from_str(r#"{"name": "projects/p1", "displayName": "Project One"}"#)
                .unwrap();
        assert_eq!(project.name, "projects/p1");
        assert_eq!(project.display_name, "Project One");
    }

    #[test]
    fn device_keeps_open_labels_and_free_type() {
        let json = r#"{
            "name": "projects/p1/devices/d1",
            "type": "someFutureSensor",
            "labels": {"name": "Fridge", "room": "kitchen"},
            "productNumber": "102081"
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.device_type, "someFutureSensor");
        assert_eq!(device.labels.get("name").map(String::as_str), Some("Fridge"));
        assert_eq!(device.labels.len(), 2);
    }

    #[test]
    fn device_without_labels_has_empty_map() {
        let device: Device =
            serde_json::from_str(r#"{"name": "projects/p1/devices/d1", "type": "touch"}"#)
                .unwrap();
        assert!(device.labels.is_empty());
    }

    #[test]
    fn temperature_event_is_preserved_verbatim() {
        let json = r#"{
            "target": "projects/p1/devices/d1",
            "data": {"temperature": {"value": 21.5, "updateTime": "2024-01-01T00:00:00Z"}}
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        let reading = event.temperature().unwrap();
        assert_eq!(reading.value, 21.5);
        assert_eq!(reading.update_time, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn unmodeled_payload_decodes_without_temperature() {
        let json = r#"{
            "target": "projects/p1/devices/d1",
            "data": {"touch": {"updateTime": "2024-01-01T00:00:00Z"}}
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.temperature().is_none());
    }

    #[test]
    fn serialized_event_omits_missing_temperature() {
        let event = Event {
            target: "projects/p1/devices/d1".to_string(),
            data: EventData::default(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"target":"projects/p1/devices/d1","data":{}}"#);
    }

    fn temperature_event(value: f64, update_time: &str) -> Event {
        Event {
            target: "projects/p1/devices/d1".to_string(),
            data: EventData {
                temperature: Some(Temperature {
                    value,
                    update_time: update_time.to_string(),
                }),
            },
        }
    }

    #[test]
    fn samples_skip_non_temperature_events() {
        let events = vec![
            temperature_event(20.0, "2024-01-01T00:00:00Z"),
            Event {
                target: "projects/p1/devices/d1".to_string(),
                data: EventData::default(),
            },
            temperature_event(21.0, "2024-01-01T01:30:00.250+01:00"),
        ];

        let samples = temperature_samples(&events).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples[0].time,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(samples[1].value, 21.0);
        assert_eq!(samples[1].time.timestamp_millis(), 1_704_069_000_250);
    }

    #[test]
    fn samples_reject_unparseable_timestamps() {
        let events = vec![temperature_event(20.0, "yesterday")];
        let err = temperature_samples(&events).unwrap_err();
        assert!(matches!(err, crate::DtApiError::Timestamp(_)));
        assert!(err.to_string().contains("yesterday"));
    }
}
