// ============================================================================
// src/record.rs – MessageRecord shaping and timestamp normalization
// ============================================================================

use chrono::{DateTime, Local, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Timezone;
use crate::event::RoomEvent;

/// One line of the message log. Field order here is the key order on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub event_id: Option<String>,
    pub room_id: Option<String>,
    pub sender: Option<String>,
    pub timestamp: String,
    pub content: Value,
}

impl MessageRecord {
    /// Shape a record from an event. The event is only borrowed.
    pub fn from_event(event: &RoomEvent<'_>, tz: Timezone) -> Self {
        Self {
            event_id: event.event_id().map(str::to_owned),
            room_id: event.room_id().map(str::to_owned),
            sender: event.sender().map(str::to_owned),
            timestamp: iso_timestamp(event.origin_server_ts().unwrap_or(0.0), tz),
            content: event
                .content()
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new())),
        }
    }

    /// Single-line JSON plus trailing newline. Non-ASCII stays UTF-8.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// Render epoch milliseconds as a naive ISO-8601 string in `tz`.
///
/// Seconds precision unless there is a sub-second part, in which case six
/// fractional digits follow. Values chrono cannot represent fall back to the
/// epoch.
pub fn iso_timestamp(ts_ms: f64, tz: Timezone) -> String {
    let instant = to_datetime(ts_ms).unwrap_or_else(|| {
        tracing::warn!(ts_ms, "origin_server_ts out of range, using epoch");
        DateTime::<Utc>::default()
    });
    let naive = in_zone(instant, tz);

    if naive.nanosecond() == 0 {
        naive.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn to_datetime(ts_ms: f64) -> Option<DateTime<Utc>> {
    if !ts_ms.is_finite() {
        return None;
    }
    let micros = (ts_ms * 1000.0).round();
    if micros < i64::MIN as f64 || micros > i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_micros(micros as i64)
}

fn in_zone(instant: DateTime<Utc>, tz: Timezone) -> NaiveDateTime {
    match tz {
        Timezone::Utc => instant.naive_utc(),
        Timezone::Local => instant.with_timezone(&Local).naive_local(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(raw: &Value) -> MessageRecord {
        MessageRecord::from_event(&RoomEvent::new(raw), Timezone::Utc)
    }

    #[test]
    fn shapes_full_event() {
        let raw = json!({
            "type": "m.room.message",
            "event_id": "$1",
            "room_id": "!r:example",
            "sender": "@a:example",
            "origin_server_ts": 1000,
            "content": { "body": "hi" },
        });
        let rec = record(&raw);
        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            json!({
                "event_id": "$1",
                "room_id": "!r:example",
                "sender": "@a:example",
                "timestamp": "1970-01-01T00:00:01",
                "content": { "body": "hi" },
            })
        );
    }

    #[test]
    fn missing_fields_become_null_epoch_and_empty_content() {
        let rec = record(&json!({ "type": "m.room.message" }));
        assert_eq!(rec.event_id, None);
        assert_eq!(rec.room_id, None);
        assert_eq!(rec.sender, None);
        assert_eq!(rec.timestamp, "1970-01-01T00:00:00");
        assert_eq!(rec.content, json!({}));
    }

    #[test]
    fn zero_and_missing_ts_agree() {
        let zero = record(&json!({ "origin_server_ts": 0 }));
        let missing = record(&json!({}));
        assert_eq!(zero.timestamp, "1970-01-01T00:00:00");
        assert_eq!(zero.timestamp, missing.timestamp);
    }

    #[test]
    fn construction_leaves_event_untouched() {
        let raw = json!({ "type": "m.room.message", "content": { "body": "x" } });
        let before = raw.clone();
        let _ = record(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn key_order_is_fixed_and_unicode_kept() {
        let raw = json!({
            "content": { "msgtype": "m.text", "body": "héllo 🌍" },
            "sender": "@ü:example",
            "event_id": "$e",
        });
        let line = record(&raw).to_line().unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.starts_with(
            "{\"event_id\":\"$e\",\"room_id\":null,\"sender\":\"@ü:example\",\"timestamp\":"
        ));
        assert!(line.contains("\"content\":{\"msgtype\":\"m.text\",\"body\":\"héllo 🌍\"}"));
    }

    #[test]
    fn sub_second_precision_uses_microseconds() {
        assert_eq!(iso_timestamp(1500.0, Timezone::Utc), "1970-01-01T00:00:01.500000");
        assert_eq!(
            iso_timestamp(1_700_000_000_123.0, Timezone::Utc),
            "2023-11-14T22:13:20.123000"
        );
    }

    #[test]
    fn unrepresentable_ts_falls_back_to_epoch() {
        assert_eq!(iso_timestamp(f64::NAN, Timezone::Utc), "1970-01-01T00:00:00");
        assert_eq!(iso_timestamp(1e300, Timezone::Utc), "1970-01-01T00:00:00");
    }

    #[test]
    fn local_zone_matches_chrono_local() {
        let expected = DateTime::<Utc>::default()
            .with_timezone(&Local)
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string();
        assert_eq!(iso_timestamp(0.0, Timezone::Local), expected);
    }

    #[test]
    fn non_object_content_is_kept_verbatim() {
        let rec = record(&json!({ "content": ["a", 1] }));
        assert_eq!(rec.content, json!(["a", 1]));
    }
}
