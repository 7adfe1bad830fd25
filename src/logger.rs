// ============================================================================
// src/logger.rs – EventLogger: filter room messages, append one JSON line
// ============================================================================

use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::config::LoggerConfig;
use crate::error::{ConfigError, WriteFailure};
use crate::event::RoomEvent;
use crate::record::MessageRecord;

/// Append-only sink for room messages.
///
/// Config is fixed at construction. Appends from concurrent handler calls
/// are serialized so lines never interleave, on top of `O_APPEND`.
#[derive(Debug)]
pub struct EventLogger {
    config: LoggerConfig,
    write_lock: Mutex<()>,
}

impl EventLogger {
    /// Validate the config (creating the log directory) and build the sink.
    pub fn new(config: LoggerConfig) -> Result<Self, ConfigError> {
        config.ensure_log_dir()?;
        Ok(Self {
            config,
            write_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn log_file(&self) -> &Path {
        &self.config.log_file
    }

    /// Room-message callback. Never fails: a dropped write is only logged.
    ///
    /// `ephemeral` and `redacted_by` mirror the host callback signature and
    /// do not affect what gets written.
    pub fn handle(
        &self,
        event: &Value,
        _ephemeral: bool,
        redacted: bool,
        _redacted_by: Option<&str>,
    ) {
        let event = RoomEvent::new(event);
        if !event.is_room_message() || redacted {
            return;
        }

        let record = MessageRecord::from_event(&event, self.config.timezone);
        if let Err(err) = self.try_append(&record) {
            tracing::error!(
                path = %self.config.log_file.display(),
                error = %err,
                "failed to log message"
            );
        }
    }

    /// Serialize `record` and append it as one line with a single write.
    pub fn try_append(&self, record: &MessageRecord) -> Result<(), WriteFailure> {
        let line = record.to_line()?;

        // Guard holds `()`, so a poisoned lock carries no broken state.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut file = self.open_log()?;
        file.write_all(line.as_bytes())
            .map_err(|source| WriteFailure::Write {
                path: self.config.log_file.clone(),
                source,
            })?;

        tracing::debug!(
            event_id = record.event_id.as_deref().unwrap_or("-"),
            "message logged"
        );
        Ok(())
    }

    fn open_log(&self) -> Result<File, WriteFailure> {
        let mut opts = OpenOptions::new();
        opts.create(true).append(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            if let Some(mode) = self.config.file_mode {
                opts.mode(mode);
            }
        }

        opts.open(&self.config.log_file)
            .map_err(|source| WriteFailure::Open {
                path: self.config.log_file.clone(),
                source,
            })
    }
}
