//! Query-string construction for the device and event endpoints
//!
//! Filter lists are sent as a single comma-joined value, so an empty list
//! produces an empty value (`device_types=`). Values are percent-encoded, but
//! commas and colons stay literal as the API documents them.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::clock::Clock;

/// How far back `fetch_events` looks when no start time is given
pub const DEFAULT_EVENT_LOOKBACK_HOURS: i64 = 48;

/// Characters escaped inside a query value. `,` and `:` are not in the set.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode one query value
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

fn encode_csv(values: &[String]) -> String {
    values
        .iter()
        .map(|value| encode_value(value))
        .collect::<Vec<_>>()
        .join(",")
}

/// `device_types=<csv>` for the device listing endpoint
pub fn device_types_query(types: &[String]) -> String {
    format!("device_types={}", encode_csv(types))
}

/// ISO 8601 UTC timestamp with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The start time used when the caller does not supply one
pub fn default_start_time(now: DateTime<Utc>) -> String {
    format_timestamp(now - Duration::hours(DEFAULT_EVENT_LOOKBACK_HOURS))
}

/// Filters for the event history endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Event types to include. Empty means no filter.
    pub event_types: Vec<String>,
    /// Start of the window as sent to the API. `None` resolves to
    /// [`default_start_time`] at request time.
    pub start_time: Option<String>,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_types<I, S>(mut self, event_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event_types = event_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    /// The explicit start time, or `now - 48h` from `clock`
    pub fn resolve_start_time(&self, clock: &dyn Clock) -> String {
        match &self.start_time {
            Some(start_time) => start_time.clone(),
            None => {
                let start_time = default_start_time(clock.now());
                tracing::debug!("No start time given, defaulting to {}", start_time);
                start_time
            }
        }
    }

    /// `start_time=<ts>&event_types=<csv>` with the start time already resolved
    pub fn to_query_string(&self, start_time: &str) -> String {
        format!(
            "start_time={}&event_types={}",
            encode_value(start_time),
            encode_csv(&self.event_types)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty_device_types_yield_empty_value() {
        assert_eq!(device_types_query(&[]), "device_types=");
    }

    #[test]
    fn device_types_are_comma_joined() {
        assert_eq!(
            device_types_query(&strings(&["temperature", "touch"])),
            "device_types=temperature,touch"
        );
    }

    #[test]
    fn timestamps_use_millis_and_zulu() {
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(time), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn default_start_time_is_48_hours_back() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 30, 0).unwrap();
        assert_eq!(default_start_time(now), "2024-01-01T12:30:00.000Z");
    }

    #[test]
    fn explicit_start_time_is_passed_through() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap());
        let query = EventQuery::new().with_start_time("2020-05-05T05:05:05Z");
        assert_eq!(query.resolve_start_time(&clock), "2020-05-05T05:05:05Z");
    }

    #[test]
    fn missing_start_time_resolves_from_clock() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap());
        let query = EventQuery::new();
        assert_eq!(query.resolve_start_time(&clock), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn event_query_string_keeps_parameter_order() {
        let query = EventQuery::new().with_event_types(["temperature", "networkStatus"]);
        assert_eq!(
            query.to_query_string("2024-01-01T00:00:00.000Z"),
            "start_time=2024-01-01T00:00:00.000Z&event_types=temperature,networkStatus"
        );
    }

    #[test]
    fn offset_start_time_is_escaped() {
        let query = EventQuery::new().with_event_types(["temperature"]);
        assert_eq!(
            query.to_query_string("2024-01-01T00:00:00+01:00"),
            "start_time=2024-01-01T00:00:00%2B01:00&event_types=temperature"
        );
    }

    #[test]
    fn reserved_characters_in_values_are_escaped() {
        assert_eq!(encode_value("a&b#c d%"), "a%26b%23c%20d%25");
        assert_eq!(
            device_types_query(&strings(&["a&b", "c"])),
            "device_types=a%26b,c"
        );
    }

    #[test]
    fn event_query_string_with_no_types_has_empty_value() {
        assert_eq!(
            EventQuery::new().to_query_string("t"),
            "start_time=t&event_types="
        );
    }
}
