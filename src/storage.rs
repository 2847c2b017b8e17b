//! Storage layer for togo
//!
//! A store lives in a single JSON document:
//!
//! ```text
//! {
//!   "todos": [
//!     { "id": 1, "title": "Write report", "completed": false,
//!       "archived": false, "created_at": "2024-05-01T09:30:00Z" }
//!   ],
//!   "next_id": 2
//! }
//! ```
//!
//! The id index is never persisted; it is rebuilt on load.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::task::{Task, TaskStore};

/// Default file name of the global store
pub const DEFAULT_FILE_NAME: &str = "todos.json";

/// On-disk shape of a whole store
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    todos: Vec<StoredTask>,
    #[serde(default)]
    next_id: u64,
}

/// On-disk shape of one task. `created_at` is optional so older files load.
#[derive(Debug, Serialize, Deserialize)]
struct StoredTask {
    id: u64,
    title: String,
    completed: bool,
    archived: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl StoredTask {
    /// Year 1 is what an unset Go time serializes to; treat it as absent.
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.filter(|at| at.year() > 1)
    }
}

impl From<&Task> for StoredTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            completed: task.completed,
            archived: task.archived,
            created_at: Some(task.created_at),
        }
    }
}

/// Persistence adapter bound to one store location
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the store. A missing file yields an empty store; a file that
    /// cannot be parsed is an error.
    pub fn load(&self) -> Result<TaskStore> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no store file, starting empty");
                return Ok(TaskStore::new());
            }
            Err(err) => return Err(err.into()),
        };

        // An empty file is what `touch .togo` leaves behind.
        if content.trim().is_empty() {
            tracing::debug!(path = %self.path.display(), "empty store file");
            return Ok(TaskStore::new());
        }

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|err| self.corrupt(err.to_string()))?;
        // serde would also accept a struct as a JSON array; only an object is a store.
        if !value.is_object() {
            return Err(self.corrupt("expected a JSON object with a `todos` array".to_string()));
        }
        let document: StoreDocument =
            serde_json::from_value(value).map_err(|err| self.corrupt(err.to_string()))?;

        let now = Utc::now();
        let mut backfilled = 0usize;
        let tasks: Vec<Task> = document
            .todos
            .into_iter()
            .map(|stored| {
                let created_at = stored.created_at().unwrap_or_else(|| {
                    backfilled += 1;
                    now
                });
                Task {
                    id: stored.id,
                    title: stored.title,
                    completed: stored.completed,
                    archived: stored.archived,
                    created_at,
                }
            })
            .collect();

        if backfilled > 0 {
            tracing::info!(
                path = %self.path.display(),
                count = backfilled,
                "backfilled missing creation times"
            );
        }

        let store = TaskStore::from_parts(tasks, document.next_id).map_err(|err| match err {
            Error::InvalidInput(reason) => self.corrupt(reason),
            other => other,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            tasks = store.len(),
            next_id = store.next_id(),
            "loaded store"
        );
        Ok(store)
    }

    /// Write the store atomically, creating the parent directory.
    pub fn save(&self, store: &TaskStore) -> Result<()> {
        let document = StoreDocument {
            todos: store.tasks().iter().map(StoredTask::from).collect(),
            next_id: store.next_id(),
        };
        write_json(&self.path, &document)?;
        tracing::debug!(path = %self.path.display(), tasks = store.len(), "saved store");
        Ok(())
    }

    /// Create an empty store file if none exists. Returns true when created.
    pub fn init(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.save(&TaskStore::new())?;
        tracing::info!(path = %self.path.display(), "initialized store");
        Ok(true)
    }

    fn corrupt(&self, reason: String) -> Error {
        Error::CorruptStore {
            path: self.path.clone(),
            reason,
        }
    }
}

// =========================================================================
// File I/O helpers
// =========================================================================

/// Write JSON data atomically (write to temp, then rename)
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

/// Write data atomically using a temp file in the target's directory + rename.
///
/// Readers see either the old or the new full content.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut temp = NamedTempFile::new_in(&parent)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| Error::Io(err.error))?;

    Ok(())
}
