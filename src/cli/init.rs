//! togo init and source commands
//!
//! `init` creates an empty `.togo` project store in the current directory;
//! `source` reports which store an invocation resolves to.

use std::path::PathBuf;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::source::{Source, SourceKind, PROJECT_FILE_NAME};
use crate::storage::Storage;

use super::{Context, GlobalOptions};

#[derive(serde::Serialize)]
struct InitReport {
    path: PathBuf,
    created: bool,
}

#[derive(serde::Serialize)]
struct SourceReport<'a> {
    #[serde(flatten)]
    source: &'a Source,
    exists: bool,
    tasks: usize,
}

pub fn run_init(globals: GlobalOptions) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let storage = Storage::new(cwd.join(PROJECT_FILE_NAME));
    let created = storage.init()?;

    let report = InitReport {
        path: storage.path().to_path_buf(),
        created,
    };

    let header = if created {
        "Initialized project store"
    } else {
        "Project store already exists"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("Path", storage.path().display().to_string());
    if created {
        human.push_next_step("togo add <title>");
    }

    emit_success(
        OutputOptions {
            json: globals.json,
            quiet: globals.quiet,
        },
        "init",
        &report,
        Some(&human),
    )
}

pub fn run_source(globals: GlobalOptions) -> Result<()> {
    let ctx = Context::load(&globals)?;
    let exists = ctx.storage.exists();
    let tasks = if exists { ctx.load_store()?.len() } else { 0 };

    let mut human = HumanOutput::new(format!("Using {} store", ctx.source.kind.label()));
    human.push_summary("Path", ctx.source.path.display().to_string());
    human.push_summary("Tasks", tasks.to_string());
    if !exists {
        human.push_summary("Not created yet", "");
    }
    if ctx.source.kind == SourceKind::Global {
        human.push_next_step("togo init (to keep tasks with this project)");
    }

    emit_success(
        ctx.output,
        "source",
        &SourceReport {
            source: &ctx.source,
            exists,
            tasks,
        },
        Some(&human),
    )
}
