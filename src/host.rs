// ============================================================================
// src/host.rs – host-side wiring: handler registration and module setup
// ============================================================================

use serde_json::Value;
use std::sync::Arc;

use crate::config::parse_config;
use crate::error::ConfigError;
use crate::logger::EventLogger;

/// Room-message callback: `(event, ephemeral, redacted, redacted_by)`.
pub type RoomMessageHandler = Box<dyn Fn(&Value, bool, bool, Option<&str>) + Send + Sync>;

/// The slice of the homeserver module API this module needs.
pub trait ModuleApi {
    fn register_room_message_handler(&mut self, handler: RoomMessageHandler);
}

/// Module entry point: parse `raw_config`, build the logger, register it.
///
/// A [`ConfigError`] is fatal to module loading and is returned untouched.
pub fn setup_module<A: ModuleApi + ?Sized>(
    api: &mut A,
    raw_config: &Value,
) -> Result<Arc<EventLogger>, ConfigError> {
    let config = parse_config(raw_config)?;
    let logger = Arc::new(EventLogger::new(config)?);

    let sink = Arc::clone(&logger);
    api.register_room_message_handler(Box::new(
        move |event: &Value, ephemeral: bool, redacted: bool, redacted_by: Option<&str>| {
            sink.handle(event, ephemeral, redacted, redacted_by)
        },
    ));

    tracing::info!(
        log_file = %logger.log_file().display(),
        "message logger registered"
    );
    Ok(logger)
}

/// In-process [`ModuleApi`]: keeps handlers and fans events out to them in
/// registration order.
#[derive(Default)]
pub struct LocalDispatcher {
    handlers: Vec<RoomMessageHandler>,
}

impl LocalDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn dispatch(&self, event: &Value, ephemeral: bool, redacted: bool, redacted_by: Option<&str>) {
        for handler in &self.handlers {
            handler(event, ephemeral, redacted, redacted_by);
        }
    }
}

impl ModuleApi for LocalDispatcher {
    fn register_room_message_handler(&mut self, handler: RoomMessageHandler) {
        self.handlers.push(handler);
    }
}
