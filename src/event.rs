// ============================================================================
// src/event.rs – read-only view over a host-delivered room event
// ============================================================================

use serde_json::Value;

/// Event type of a plain room message.
pub const ROOM_MESSAGE: &str = "m.room.message";

/// Borrowed accessor over the event mapping the host hands us.
///
/// Every getter tolerates absent or mistyped fields; the host owns the
/// event shape and we never reject one.
#[derive(Debug, Clone, Copy)]
pub struct RoomEvent<'a> {
    raw: &'a Value,
}

impl<'a> RoomEvent<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    pub fn event_type(&self) -> Option<&'a str> {
        self.str_field("type")
    }

    pub fn is_room_message(&self) -> bool {
        self.event_type() == Some(ROOM_MESSAGE)
    }

    pub fn event_id(&self) -> Option<&'a str> {
        self.str_field("event_id")
    }

    pub fn room_id(&self) -> Option<&'a str> {
        self.str_field("room_id")
    }

    pub fn sender(&self) -> Option<&'a str> {
        self.str_field("sender")
    }

    /// Milliseconds since the epoch. Float values are accepted as sent.
    pub fn origin_server_ts(&self) -> Option<f64> {
        self.raw.get("origin_server_ts").and_then(Value::as_f64)
    }

    /// `None` when absent or explicitly `null`.
    pub fn content(&self) -> Option<&'a Value> {
        self.raw.get("content").filter(|c| !c.is_null())
    }
}
