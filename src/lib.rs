// ============================================================================
// src/lib.rs – Synapse message logger: room messages → JSON Lines
// ============================================================================

pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod logger;
pub mod record;

pub use config::{parse_config, LoggerConfig, Timezone, DEFAULT_LOG_FILE};
pub use error::{ConfigError, WriteFailure};
pub use event::{RoomEvent, ROOM_MESSAGE};
pub use host::{setup_module, LocalDispatcher, ModuleApi, RoomMessageHandler};
pub use logger::EventLogger;
pub use record::MessageRecord;
