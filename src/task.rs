//! Task model for togo.
//!
//! A [`TaskStore`] owns the ordered task list, the id allocator, and an
//! id→position index. Insertion order is the display order and survives
//! deletes and save/load; ids are never reused.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// First id handed out by an empty store
pub const FIRST_TASK_ID: u64 = 1;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Human status label used by the CLI and the browser
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    index: HashMap<u64, usize>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: FIRST_TASK_ID,
            index: HashMap::new(),
        }
    }

    /// Rebuild a store from persisted parts.
    ///
    /// Rejects duplicate ids. A `next_id` that does not exceed every stored id
    /// is raised to `max(id) + 1` so new tasks can never collide. The counter
    /// must stay below `u64::MAX` so `add` always has a next id to hand out.
    pub fn from_parts(tasks: Vec<Task>, next_id: u64) -> Result<Self> {
        let floor = match tasks.iter().map(|task| task.id).max() {
            Some(max_id) => max_id.checked_add(1).ok_or_else(|| {
                Error::InvalidInput(format!("task id {max_id} leaves no room for new ids"))
            })?,
            None => FIRST_TASK_ID,
        };
        let next_id = next_id.max(floor);
        if next_id == u64::MAX {
            return Err(Error::InvalidInput(format!(
                "next_id {next_id} leaves no room for new ids"
            )));
        }
        let mut store = Self {
            tasks,
            next_id,
            index: HashMap::new(),
        };
        store.rebuild_index();
        if store.index.len() != store.tasks.len() {
            return Err(Error::InvalidInput(format!(
                "duplicate task ids in {} tasks",
                store.tasks.len()
            )));
        }
        Ok(store)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a new pending task and return a copy of it.
    pub fn add(&mut self, title: impl Into<String>) -> Task {
        let task = Task {
            id: self.next_id,
            title: title.into(),
            completed: false,
            archived: false,
            created_at: Utc::now(),
        };
        self.tasks.push(task.clone());
        self.index.insert(task.id, self.tasks.len() - 1);
        self.next_id += 1;
        task
    }

    /// Flip completion. Returns false when the id is unknown.
    pub fn toggle(&mut self, id: u64) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn archive(&mut self, id: u64) -> bool {
        self.set_archived(id, true)
    }

    pub fn unarchive(&mut self, id: u64) -> bool {
        self.set_archived(id, false)
    }

    /// Remove a task without renumbering the rest.
    pub fn delete(&mut self, id: u64) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.tasks.remove(pos);
        self.rebuild_index();
        true
    }

    /// Delete the first task whose title matches exactly.
    pub fn delete_by_title(&mut self, title: &str, case_sensitive: bool) -> bool {
        match self.find_by_title(title, case_sensitive).map(|task| task.id) {
            Some(id) => self.delete(id),
            None => false,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.position(id).map(|pos| &self.tasks[pos])
    }

    /// All tasks in store order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Snapshot of non-archived tasks
    pub fn active(&self) -> Vec<Task> {
        self.tasks.iter().filter(|task| !task.archived).cloned().collect()
    }

    /// Snapshot of archived tasks
    pub fn archived(&self) -> Vec<Task> {
        self.tasks.iter().filter(|task| task.archived).cloned().collect()
    }

    /// First task (in store order) whose title equals `title`. Not a substring search.
    pub fn find_by_title(&self, title: &str, case_sensitive: bool) -> Option<&Task> {
        self.tasks.iter().find(|task| {
            if case_sensitive {
                task.title == title
            } else {
                titles_equal_ignore_case(&task.title, title)
            }
        })
    }

    pub fn titles(&self) -> Vec<String> {
        self.tasks.iter().map(|task| task.title.clone()).collect()
    }

    /// Titles split into (active, archived), each in store order
    pub fn active_and_archived_titles(&self) -> (Vec<String>, Vec<String>) {
        let mut active = Vec::new();
        let mut archived = Vec::new();
        for task in &self.tasks {
            if task.archived {
                archived.push(task.title.clone());
            } else {
                active.push(task.title.clone());
            }
        }
        (active, archived)
    }

    fn set_archived(&mut self, id: u64, archived: bool) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.archived = archived;
                true
            }
            None => false,
        }
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        let pos = self.position(id)?;
        self.tasks.get_mut(pos)
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .tasks
            .iter()
            .enumerate()
            .map(|(pos, task)| (task.id, pos))
            .collect();
    }
}

/// Unicode-aware case-insensitive equality
pub(crate) fn titles_equal_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Compact age label: "3h", "12m", or "now".
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes() % 60;
    if hours > 0 {
        format!("{hours}h")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        "now".to_string()
    }
}
