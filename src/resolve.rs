//! Resolve free-form user input to a single task.
//!
//! Precedence, first match wins:
//! 1. exact title (case-insensitive)
//! 2. numeric id
//! 3. case-insensitive substring; several hits go to a [`Disambiguate`] callback
//!
//! A title that looks like a number is still matched as a title before the
//! input is tried as an id.

use crate::error::{Error, Result};
use crate::task::{titles_equal_ignore_case, Task, TaskStore};

/// Which archived state a candidate must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFilter {
    Any,
    Active,
    Archived,
}

impl ArchiveFilter {
    pub fn accepts(self, task: &Task) -> bool {
        match self {
            ArchiveFilter::Any => true,
            ArchiveFilter::Active => !task.archived,
            ArchiveFilter::Archived => task.archived,
        }
    }

    /// Candidate pool from a store, in store order
    pub fn pool(self, store: &TaskStore) -> Vec<Task> {
        store
            .tasks()
            .iter()
            .filter(|task| self.accepts(task))
            .cloned()
            .collect()
    }
}

/// Outcome of matching input against a pool before any user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Title(Task),
    Id(Task),
    Fuzzy(Vec<Task>),
}

/// Picks one task out of several fuzzy matches.
///
/// `Ok(None)` means the user declined to pick.
pub trait Disambiguate {
    fn choose(&mut self, input: &str, candidates: &[Task]) -> Result<Option<Task>>;
}

impl<F> Disambiguate for F
where
    F: FnMut(&str, &[Task]) -> Result<Option<Task>>,
{
    fn choose(&mut self, input: &str, candidates: &[Task]) -> Result<Option<Task>> {
        self(input, candidates)
    }
}

/// Chooser for non-interactive callers: several matches are an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectAmbiguous;

impl Disambiguate for RejectAmbiguous {
    fn choose(&mut self, input: &str, candidates: &[Task]) -> Result<Option<Task>> {
        Err(Error::AmbiguousMatch {
            input: input.to_string(),
            candidates: candidates
                .iter()
                .map(|task| format!("{} ({})", task.title, task.id))
                .collect(),
        })
    }
}

/// Match `input` against `pool` without asking anyone.
pub fn lookup(pool: &[Task], input: &str, filter: ArchiveFilter) -> Lookup {
    let candidates = pool.iter().filter(|task| filter.accepts(task));

    if let Some(task) = candidates
        .clone()
        .find(|task| titles_equal_ignore_case(&task.title, input))
    {
        return Lookup::Title(task.clone());
    }

    if let Ok(id) = input.parse::<u64>() {
        if let Some(task) = candidates.clone().find(|task| task.id == id) {
            return Lookup::Id(task.clone());
        }
    }

    let needle = input.to_lowercase();
    let matches = candidates
        .filter(|task| task.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    Lookup::Fuzzy(matches)
}

/// Resolve `input` to exactly one task from `pool`.
pub fn resolve(
    pool: &[Task],
    input: &str,
    filter: ArchiveFilter,
    chooser: &mut dyn Disambiguate,
) -> Result<Task> {
    match lookup(pool, input, filter) {
        Lookup::Title(task) | Lookup::Id(task) => Ok(task),
        Lookup::Fuzzy(mut matches) => match matches.len() {
            0 => Err(Error::NoMatch(input.to_string())),
            1 => Ok(matches.remove(0)),
            _ => chooser
                .choose(input, &matches)?
                .ok_or(Error::Cancelled),
        },
    }
}

/// Resolve against every task in `store` that passes `filter`.
pub fn resolve_in_store(
    store: &TaskStore,
    input: &str,
    filter: ArchiveFilter,
    chooser: &mut dyn Disambiguate,
) -> Result<Task> {
    resolve(store.tasks(), input, filter, chooser)
}
