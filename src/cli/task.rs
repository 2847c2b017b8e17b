//! Task commands: add, toggle, archive, unarchive, delete, show, list, titles,
//! and the bare browser.

use chrono::Utc;
use serde::Serialize;

use crate::config::ViewMode;
use crate::error::{Error, Result};
use crate::output::{emit_lines, emit_success, HumanOutput};
use crate::resolve::{self, ArchiveFilter};
use crate::source::Source;
use crate::task::{format_age, Task, TaskStore};
use crate::ui::{browser, picker};

use super::{Context, GlobalOptions};

pub struct AddOptions {
    pub title: Vec<String>,
    pub globals: GlobalOptions,
}

pub struct TargetOptions {
    pub input: Option<String>,
    pub globals: GlobalOptions,
}

pub struct DeleteOptions {
    pub input: Option<String>,
    pub yes: bool,
    pub globals: GlobalOptions,
}

pub struct ListOptions {
    pub archived: bool,
    pub all: bool,
    pub plain: bool,
    pub globals: GlobalOptions,
}

pub struct TitlesOptions {
    pub active: bool,
    pub archived: bool,
    pub globals: GlobalOptions,
}

#[derive(Serialize)]
struct TaskReport<'a> {
    source: &'a Source,
    task: &'a Task,
}

#[derive(Serialize)]
struct ListReport<'a> {
    source: &'a Source,
    view: ViewMode,
    tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
struct TitlesReport {
    titles: Vec<String>,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let title = options.title.join(" ").trim().to_string();
    if title.is_empty() {
        return Err(Error::InvalidInput("title cannot be empty".to_string()));
    }

    let ctx = Context::load(&options.globals)?;
    let mut store = ctx.load_store()?;
    let task = store.add(title);
    ctx.save_store(&store)?;
    tracing::info!(id = task.id, "added task");

    let mut human = HumanOutput::new(format!("Task added: {}", task.title));
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Store", ctx.source.kind.label());

    emit_success(
        ctx.output,
        "add",
        &TaskReport {
            source: &ctx.source,
            task: &task,
        },
        Some(&human),
    )
}

pub fn run_toggle(options: TargetOptions) -> Result<()> {
    let ctx = Context::load(&options.globals)?;
    let mut store = ctx.load_store()?;
    let target = resolve_target(&ctx, &store, options.input, ArchiveFilter::Any, "toggle")?;
    store.toggle(target.id);
    ctx.save_store(&store)?;

    let task = current(&store, target.id)?;
    let header = if task.completed {
        format!("Task completed: {}", task.title)
    } else {
        format!("Task marked pending: {}", task.title)
    };
    report_task(&ctx, "toggle", header, task)
}

pub fn run_archive(options: TargetOptions) -> Result<()> {
    let ctx = Context::load(&options.globals)?;
    let mut store = ctx.load_store()?;
    let target = resolve_target(&ctx, &store, options.input, ArchiveFilter::Active, "archive")?;
    store.archive(target.id);
    ctx.save_store(&store)?;

    let task = current(&store, target.id)?;
    report_task(&ctx, "archive", format!("Task archived: {}", task.title), task)
}

pub fn run_unarchive(options: TargetOptions) -> Result<()> {
    let ctx = Context::load(&options.globals)?;
    let mut store = ctx.load_store()?;
    let target = resolve_target(
        &ctx,
        &store,
        options.input,
        ArchiveFilter::Archived,
        "unarchive",
    )?;
    store.unarchive(target.id);
    ctx.save_store(&store)?;

    let task = current(&store, target.id)?;
    report_task(&ctx, "unarchive", format!("Task unarchived: {}", task.title), task)
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let ctx = Context::load(&options.globals)?;
    let mut store = ctx.load_store()?;
    let task = resolve_target(&ctx, &store, options.input, ArchiveFilter::Any, "delete")?;

    if !options.yes && ctx.config.confirm_delete {
        if !ctx.interactive {
            return Err(Error::InvalidInput(
                "refusing to delete without confirmation; pass --yes".to_string(),
            ));
        }
        let question = format!("Are you sure you want to delete \"{}\"?", task.title);
        if !picker::confirm(&question)? {
            return Err(Error::Cancelled);
        }
    }

    if !store.delete(task.id) {
        return Err(Error::TaskNotFound(task.id));
    }
    ctx.save_store(&store)?;
    tracing::info!(id = task.id, "deleted task");

    report_task(&ctx, "delete", format!("Task deleted: {}", task.title), &task)
}

pub fn run_show(options: TargetOptions) -> Result<()> {
    let ctx = Context::load(&options.globals)?;
    let store = ctx.load_store()?;
    let task = resolve_target(&ctx, &store, options.input, ArchiveFilter::Any, "show")?;

    let mut human = HumanOutput::new(task.title.clone());
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Status", task.status_label());
    human.push_summary("Archived", if task.archived { "yes" } else { "no" });
    human.push_summary("Created", task.created_at.to_rfc3339());
    human.push_summary("Age", format_age(task.created_at, Utc::now()));

    emit_success(
        ctx.output,
        "show",
        &TaskReport {
            source: &ctx.source,
            task: &task,
        },
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let mode = if options.all {
        ViewMode::All
    } else if options.archived {
        ViewMode::Archived
    } else {
        ViewMode::Active
    };
    let ctx = Context::load(&options.globals)?;
    let store = ctx.load_store()?;

    if ctx.interactive && !options.plain {
        return browse(&ctx, store, mode);
    }
    print_listing(&ctx, &store, mode, "list")
}

/// Bare `togo`: the browser in a terminal, a plain listing otherwise.
pub fn run_browse(globals: GlobalOptions) -> Result<()> {
    let ctx = Context::load(&globals)?;
    let store = ctx.load_store()?;
    let mode = ctx.config.browser.view;

    if !ctx.interactive {
        return print_listing(&ctx, &store, mode, "togo");
    }
    if store.is_empty() {
        let mut human = HumanOutput::new("No tasks yet");
        human.push_next_step("togo add <title>");
        return emit_success(ctx.output, "togo", &Vec::<Task>::new(), Some(&human));
    }
    browse(&ctx, store, mode)
}

pub fn run_titles(options: TitlesOptions) -> Result<()> {
    let ctx = Context::load(&options.globals)?;
    let store = ctx.load_store()?;
    let (active, archived) = store.active_and_archived_titles();
    let titles = if options.active {
        active
    } else if options.archived {
        archived
    } else {
        store.titles()
    };

    emit_lines(
        ctx.output,
        "titles",
        &TitlesReport {
            titles: titles.clone(),
        },
        &titles,
    )
}

fn browse(ctx: &Context, store: TaskStore, mode: ViewMode) -> Result<()> {
    let outcome = browser::run(
        store,
        mode,
        ctx.source.kind.label(),
        ctx.config.browser.show_help,
    )?;
    if outcome.changed {
        ctx.save_store(&outcome.store)?;
        tracing::info!(tasks = outcome.store.len(), "saved changes from browser");
    }
    Ok(())
}

fn print_listing(ctx: &Context, store: &TaskStore, mode: ViewMode, command: &str) -> Result<()> {
    let filter = mode.filter();
    let tasks: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|task| filter.accepts(task))
        .collect();

    let now = Utc::now();
    let lines: Vec<String> = if tasks.is_empty() {
        vec![format!("No {} tasks", mode.label())]
    } else {
        tasks.iter().map(|task| listing_line(task, now)).collect()
    };

    emit_lines(
        ctx.output,
        command,
        &ListReport {
            source: &ctx.source,
            view: mode,
            tasks,
        },
        &lines,
    )
}

fn listing_line(task: &Task, now: chrono::DateTime<Utc>) -> String {
    let check = if task.completed { "x" } else { " " };
    let archived = if task.archived { "  (archived)" } else { "" };
    format!(
        "{:>4}  [{check}] {}{archived}  {}",
        task.id,
        task.title,
        format_age(task.created_at, now)
    )
}

/// Resolve user input (or an interactive pick) against the `filter` pool.
fn resolve_target(
    ctx: &Context,
    store: &TaskStore,
    input: Option<String>,
    filter: ArchiveFilter,
    verb: &str,
) -> Result<Task> {
    let pool = filter.pool(store);
    if pool.is_empty() {
        return Err(Error::NoTasks(empty_pool_message(filter)));
    }

    match input {
        Some(input) => {
            let mut chooser = ctx.chooser();
            resolve::resolve(&pool, &input, ArchiveFilter::Any, chooser.as_mut())
        }
        None if ctx.interactive => {
            picker::pick_task(&format!("Select a task to {verb}"), &pool)?.ok_or(Error::Cancelled)
        }
        None => Err(Error::InvalidInput(format!(
            "a task title or id is required to {verb}"
        ))),
    }
}

fn empty_pool_message(filter: ArchiveFilter) -> String {
    match filter {
        ArchiveFilter::Any => "no tasks".to_string(),
        ArchiveFilter::Active => "no active tasks".to_string(),
        ArchiveFilter::Archived => "no archived tasks".to_string(),
    }
}

fn current(store: &TaskStore, id: u64) -> Result<&Task> {
    store.get(id).ok_or(Error::TaskNotFound(id))
}

fn report_task(ctx: &Context, command: &str, header: String, task: &Task) -> Result<()> {
    let mut human = HumanOutput::new(header);
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Status", task.status_label());
    if task.archived {
        human.push_summary("Archived", "");
    }

    emit_success(
        ctx.output,
        command,
        &TaskReport {
            source: &ctx.source,
            task,
        },
        Some(&human),
    )
}
