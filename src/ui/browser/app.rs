use std::collections::BTreeSet;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::ViewMode;
use crate::error::Result;
use crate::task::{Task, TaskStore};
use crate::ui::terminal::{self, Term};

use super::model::{self, plural_tasks, Counts, Row};
use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Tasks waiting for a y/n answer before deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmState {
    pub ids: Vec<u64>,
    pub title: Option<String>,
}

/// What the caller gets back when the browser closes
#[derive(Debug)]
pub struct BrowserOutcome {
    pub store: TaskStore,
    pub changed: bool,
}

#[derive(Debug)]
pub struct BrowserState {
    store: TaskStore,
    pub(crate) mode: ViewMode,
    pub(crate) rows: Vec<Row>,
    pub(crate) selected: usize,
    pub(crate) marked: BTreeSet<u64>,
    pub(crate) input: Option<String>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) show_detail: bool,
    pub(crate) show_help: bool,
    status: Option<(String, StatusKind)>,
    changed: bool,
    pub(crate) source_label: String,
}

impl BrowserState {
    pub fn new(
        store: TaskStore,
        mode: ViewMode,
        source_label: impl Into<String>,
        show_help: bool,
    ) -> Self {
        let mut state = Self {
            store,
            mode,
            rows: Vec::new(),
            selected: 0,
            marked: BTreeSet::new(),
            input: None,
            delete_confirm: None,
            show_detail: false,
            show_help,
            status: None,
            changed: false,
            source_label: source_label.into(),
        };
        state.refresh_rows(None);
        state
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn into_outcome(self) -> BrowserOutcome {
        BrowserOutcome {
            store: self.store,
            changed: self.changed,
        }
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.rows.get(self.selected).map(|row| row.id)
    }

    pub(crate) fn selected_task(&self) -> Option<&Task> {
        self.selected_id().and_then(|id| self.store.get(id))
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        self.status.clone()
    }

    pub(crate) fn counts(&self) -> Counts {
        model::counts(&self.store)
    }

    /// Handle one key press. Returns true when the browser should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.input.is_some() {
            self.handle_input_key(key);
            return false;
        }

        if let Some(confirm) = self.delete_confirm.take() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.delete_ids(&confirm.ids),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
                    self.set_info("Delete cancelled");
                }
                _ => self.delete_confirm = Some(confirm),
            }
            return false;
        }

        if self.show_detail {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    self.show_detail = false;
                    return false;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = self.rows.len().saturating_sub(1),
            KeyCode::Tab => {
                let keep = self.selected_id();
                self.mode = self.mode.next();
                self.refresh_rows(keep);
                self.set_info(format!("Showing {} tasks", self.mode.label()));
            }
            KeyCode::Char(' ') => self.toggle_mark(),
            KeyCode::Char('t') => self.toggle_targets(),
            KeyCode::Char('n') => self.archive_targets(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('a') => {
                self.show_detail = false;
                self.input = Some(String::new());
            }
            KeyCode::Enter => self.show_detail = self.selected_id().is_some(),
            KeyCode::Char('.') => self.show_help = !self.show_help,
            _ => {}
        }
        false
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(buffer) = self.input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.input = None;
                self.set_info("Add cancelled");
            }
            KeyCode::Enter => {
                let title = buffer.trim().to_string();
                if title.is_empty() {
                    self.set_error("title cannot be empty");
                    return;
                }
                self.input = None;
                let task = self.store.add(title);
                self.changed = true;
                self.refresh_rows(Some(task.id));
                self.set_info("New task added");
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(ch) => buffer.push(ch),
            _ => {}
        }
    }

    /// Marked ids in store order, or the selected row when nothing is marked.
    fn targets(&self) -> Vec<u64> {
        if self.marked.is_empty() {
            return self.selected_id().into_iter().collect();
        }
        self.store
            .tasks()
            .iter()
            .map(|task| task.id)
            .filter(|id| self.marked.contains(id))
            .collect()
    }

    fn toggle_mark(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if !self.marked.remove(&id) {
            self.marked.insert(id);
        }
    }

    fn toggle_targets(&mut self) {
        let bulk = !self.marked.is_empty();
        let mut updated = 0;
        let mut unarchived = false;
        for id in self.targets() {
            let Some(archived) = self.store.get(id).map(|task| task.archived) else {
                continue;
            };
            if archived {
                self.store.unarchive(id);
            } else {
                self.store.toggle(id);
            }
            unarchived = archived;
            updated += 1;
        }
        if updated == 0 {
            return;
        }
        self.changed = true;
        let keep = self.selected_id();
        self.refresh_rows(keep);
        if bulk {
            self.set_info(format!("{} updated", plural_tasks(updated)));
        } else if unarchived {
            self.set_info("Task unarchived");
        } else {
            self.set_info("Task updated");
        }
    }

    fn archive_targets(&mut self) {
        let bulk = !self.marked.is_empty();
        let mut updated = 0;
        let mut unarchived = false;
        for id in self.targets() {
            let Some(archived) = self.store.get(id).map(|task| task.archived) else {
                continue;
            };
            if archived {
                self.store.unarchive(id);
            } else {
                self.store.archive(id);
            }
            unarchived = archived;
            updated += 1;
        }
        if updated == 0 {
            return;
        }
        self.changed = true;
        let keep = self.selected_id();
        self.refresh_rows(keep);
        if bulk {
            self.set_info(format!("{} updated", plural_tasks(updated)));
        } else if unarchived {
            self.set_info("Task unarchived");
        } else {
            self.set_info("Task archived");
        }
    }

    fn request_delete(&mut self) {
        let ids = self.targets();
        let title = match ids.as_slice() {
            [id] => self.store.get(*id).map(|task| task.title.clone()),
            _ => None,
        };
        if !ids.is_empty() {
            self.show_detail = false;
            self.delete_confirm = Some(DeleteConfirmState { ids, title });
        }
    }

    fn delete_ids(&mut self, ids: &[u64]) {
        let deleted = ids.iter().filter(|id| self.store.delete(**id)).count();
        for id in ids {
            self.marked.remove(id);
        }
        if deleted == 0 {
            return;
        }
        self.changed = true;
        self.refresh_rows(None);
        if deleted == 1 {
            self.set_info("Task deleted");
        } else {
            self.set_info(format!("{} deleted", plural_tasks(deleted)));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.rows.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    /// Rebuild the row table, keeping `keep` selected when it is still visible.
    fn refresh_rows(&mut self, keep: Option<u64>) {
        self.rows = model::build_rows(&self.store, self.mode, Utc::now());
        self.marked.retain(|id| self.store.get(*id).is_some());
        if let Some(pos) = keep.and_then(|id| self.rows.iter().position(|row| row.id == id)) {
            self.selected = pos;
        } else {
            self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        }
        if self.rows.is_empty() {
            self.show_detail = false;
        }
    }

    fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), StatusKind::Info));
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), StatusKind::Error));
    }
}

/// Browse `store` full screen until the user quits.
pub fn run(
    store: TaskStore,
    mode: ViewMode,
    source_label: &str,
    show_help: bool,
) -> Result<BrowserOutcome> {
    let mut app = BrowserState::new(store, mode, source_label, show_help);
    terminal::with_terminal(|term| run_loop(term, &mut app))?;
    tracing::debug!(changed = app.changed(), "browser closed");
    Ok(app.into_outcome())
}

fn run_loop(terminal: &mut Term, app: &mut BrowserState) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }
    Ok(())
}
