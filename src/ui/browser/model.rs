use chrono::{DateTime, Utc};

use crate::config::ViewMode;
use crate::task::{format_age, Task, TaskStore};

/// One visible row. Rows refer to tasks by id only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u64,
    pub title: String,
    pub status: &'static str,
    pub archived: bool,
    pub completed: bool,
    pub age: String,
}

impl Row {
    fn from_task(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            status: task.status_label(),
            archived: task.archived,
            completed: task.completed,
            age: format_age(task.created_at, now),
        }
    }
}

/// Rows for `mode`, in store order
pub fn build_rows(store: &TaskStore, mode: ViewMode, now: DateTime<Utc>) -> Vec<Row> {
    let filter = mode.filter();
    store
        .tasks()
        .iter()
        .filter(|task| filter.accepts(task))
        .map(|task| Row::from_task(task, now))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub archived: usize,
}

pub fn counts(store: &TaskStore) -> Counts {
    store
        .tasks()
        .iter()
        .fold(Counts::default(), |mut counts, task| {
            counts.total += 1;
            if task.archived {
                counts.archived += 1;
            } else if task.completed {
                counts.completed += 1;
            } else {
                counts.pending += 1;
            }
            counts
        })
}

/// "1 task" / "3 tasks"
pub fn plural_tasks(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{count} tasks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaskStore {
        let mut store = TaskStore::new();
        store.add("Buy milk");
        store.add("Buy milk and eggs");
        store.add("Walk dog");
        store.toggle(2);
        store.archive(3);
        store
    }

    #[test]
    fn rows_follow_view_mode() {
        let store = sample();
        let now = Utc::now();
        let ids = |mode| -> Vec<u64> {
            build_rows(&store, mode, now)
                .into_iter()
                .map(|row| row.id)
                .collect()
        };
        assert_eq!(ids(ViewMode::Active), vec![1, 2]);
        assert_eq!(ids(ViewMode::Archived), vec![3]);
        assert_eq!(ids(ViewMode::All), vec![1, 2, 3]);
    }

    #[test]
    fn rows_carry_labels() {
        let store = sample();
        let rows = build_rows(&store, ViewMode::All, Utc::now());
        assert_eq!(rows[0].status, "Pending");
        assert_eq!(rows[1].status, "Completed");
        assert!(rows[2].archived);
        assert_eq!(rows[0].age, "now");
    }

    #[test]
    fn counts_partition_store() {
        let counts = counts(&sample());
        assert_eq!(
            counts,
            Counts {
                total: 3,
                pending: 1,
                completed: 1,
                archived: 1,
            }
        );
    }

    #[test]
    fn plural() {
        assert_eq!(plural_tasks(1), "1 task");
        assert_eq!(plural_tasks(0), "0 tasks");
        assert_eq!(plural_tasks(2), "2 tasks");
    }
}
