//! Error types for togo
//!
//! Exit codes:
//! - 0: Success (including a cancelled pick or confirmation)
//! - 2: User error (no match, ambiguous input, bad arguments or config)
//! - 4: Storage fault (I/O, corrupt store, unreadable config)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the togo CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const STORAGE_FAULT: i32 = 4;
}

/// Main error type for togo operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("no tasks matched \"{0}\"")]
    NoMatch(String),

    #[error("task not found: {0}")]
    TaskNotFound(u64),

    #[error("{0}")]
    NoTasks(String),

    #[error("multiple tasks match \"{input}\": {}", .candidates.join(", "))]
    AmbiguousMatch {
        input: String,
        candidates: Vec<String>,
    },

    #[error("Invalid argument: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No .togo project store found from {0}")]
    ProjectNotFound(PathBuf),

    // Not a fault: the user declined a pick or a confirmation
    #[error("Operation cancelled")]
    Cancelled,

    // Storage faults (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Corrupt task store {path}: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    #[error("Could not determine the user home directory")]
    NoHomeDir,
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Cancelled => exit_codes::SUCCESS,

            Error::NoMatch(_)
            | Error::TaskNotFound(_)
            | Error::NoTasks(_)
            | Error::AmbiguousMatch { .. }
            | Error::InvalidInput(_)
            | Error::InvalidConfig(_)
            | Error::ProjectNotFound(_) => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::CorruptStore { .. }
            | Error::NoHomeDir => exit_codes::STORAGE_FAULT,
        }
    }

    /// True for "nothing matched" outcomes that a long-lived session can ignore
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NoMatch(_) | Error::TaskNotFound(_) | Error::NoTasks(_)
        )
    }

    /// True for failures that mean persisted data could not be read or written
    pub fn is_storage_fault(&self) -> bool {
        self.exit_code() == exit_codes::STORAGE_FAULT
    }

    /// Structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::AmbiguousMatch { input, candidates } => Some(serde_json::json!({
                "input": input,
                "candidates": candidates,
            })),
            Error::TaskNotFound(id) => Some(serde_json::json!({ "id": id })),
            Error::CorruptStore { path, .. } | Error::ProjectNotFound(path) => {
                Some(serde_json::json!({ "path": path }))
            }
            _ => None,
        }
    }
}

/// Result type alias for togo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
