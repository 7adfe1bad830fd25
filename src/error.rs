// ============================================================================
// src/error.rs – error taxonomy for module init and appends
// ============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal at module initialization; handed back to the host's loader.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid module config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("log_file must not be empty")]
    EmptyLogFile,

    #[error("create log directory {}: {source}", dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A dropped record. Logged by the handler, never propagated to the host.
#[derive(Debug, Error)]
pub enum WriteFailure {
    #[error("serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
