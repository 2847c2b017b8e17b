//! Command-line interface for togo
//!
//! This module defines the CLI structure using clap derive macros.
//! Task commands live in `task`, store setup in `init`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::resolve::{Disambiguate, RejectAmbiguous};
use crate::source::{self, Source, SourceOptions};
use crate::storage::Storage;
use crate::task::TaskStore;
use crate::ui::picker::TerminalChooser;
use crate::ui::terminal;

mod init;
mod task;

/// togo - a small personal task list
///
/// Run without a command to browse tasks in the terminal.
#[derive(Parser, Debug)]
#[command(name = "togo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use this store file instead of the project or global store
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Use the global store even inside a project
    #[arg(long, global = true, conflicts_with = "project")]
    pub global: bool,

    /// Require a project store (a `.togo` file here or in a parent directory)
    #[arg(long, global = true)]
    pub project: bool,

    /// Global data directory (defaults to ~/.togo)
    #[arg(long, global = true, env = "TOGO_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task title (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Toggle a task between pending and completed
    Toggle {
        /// Title, id, or part of a title (pick interactively when omitted)
        input: Vec<String>,
    },

    /// Archive an active task
    Archive {
        /// Title, id, or part of a title (pick interactively when omitted)
        input: Vec<String>,
    },

    /// Restore an archived task
    Unarchive {
        /// Title, id, or part of a title (pick interactively when omitted)
        input: Vec<String>,
    },

    /// Delete a task
    Delete {
        /// Title, id, or part of a title (pick interactively when omitted)
        input: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show one task
    Show {
        /// Title, id, or part of a title
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },

    /// List tasks (opens the browser in a terminal)
    List {
        /// Only archived tasks
        #[arg(short = 'a', long, conflicts_with = "all")]
        archived: bool,

        /// Active and archived tasks
        #[arg(long)]
        all: bool,

        /// Print a plain listing instead of opening the browser
        #[arg(long)]
        plain: bool,
    },

    /// Print task titles, one per line
    Titles {
        /// Only active tasks
        #[arg(long, conflicts_with = "archived")]
        active: bool,

        /// Only archived tasks
        #[arg(long)]
        archived: bool,
    },

    /// Create a project store (`.togo`) in the current directory
    Init,

    /// Show which store this invocation uses
    Source,
}

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub file: Option<PathBuf>,
    pub global: bool,
    pub project: bool,
    pub home: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let globals = GlobalOptions {
            file: self.file,
            global: self.global,
            project: self.project,
            home: self.home,
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            None => task::run_browse(globals),
            Some(Commands::Add { title }) => task::run_add(task::AddOptions { title, globals }),
            Some(Commands::Toggle { input }) => task::run_toggle(task::TargetOptions {
                input: join_input(input),
                globals,
            }),
            Some(Commands::Archive { input }) => task::run_archive(task::TargetOptions {
                input: join_input(input),
                globals,
            }),
            Some(Commands::Unarchive { input }) => task::run_unarchive(task::TargetOptions {
                input: join_input(input),
                globals,
            }),
            Some(Commands::Delete { input, yes }) => task::run_delete(task::DeleteOptions {
                input: join_input(input),
                yes,
                globals,
            }),
            Some(Commands::Show { input }) => task::run_show(task::TargetOptions {
                input: join_input(input),
                globals,
            }),
            Some(Commands::List {
                archived,
                all,
                plain,
            }) => task::run_list(task::ListOptions {
                archived,
                all,
                plain,
                globals,
            }),
            Some(Commands::Titles { active, archived }) => {
                task::run_titles(task::TitlesOptions {
                    active,
                    archived,
                    globals,
                })
            }
            Some(Commands::Init) => init::run_init(globals),
            Some(Commands::Source) => init::run_source(globals),
        }
    }
}

/// Positional words joined into one input; `None` when nothing was given.
fn join_input(words: Vec<String>) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Everything a command needs once the store location is known
pub(crate) struct Context {
    pub source: Source,
    pub storage: Storage,
    pub config: Config,
    pub output: OutputOptions,
    pub interactive: bool,
}

impl Context {
    pub fn load(globals: &GlobalOptions) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let config = match source::global_root(globals.home.as_deref()) {
            Ok(root) => Config::load_from_dir(&root),
            Err(err) => {
                tracing::debug!(error = %err, "no global data directory, using default config");
                Config::default()
            }
        };

        let source = source::resolve(
            &SourceOptions {
                home: globals.home.clone(),
                cwd,
                file: globals.file.clone(),
                global: globals.global,
                project: globals.project,
            },
            &config,
        )?;
        let storage = source.storage();

        Ok(Self {
            source,
            storage,
            config,
            output: OutputOptions {
                json: globals.json,
                quiet: globals.quiet,
            },
            interactive: !globals.json && terminal::is_interactive(),
        })
    }

    pub fn load_store(&self) -> Result<TaskStore> {
        self.storage.load()
    }

    pub fn save_store(&self, store: &TaskStore) -> Result<()> {
        self.storage.save(store)
    }

    /// Terminal picker when a user can answer, otherwise ambiguity is an error.
    pub fn chooser(&self) -> Box<dyn Disambiguate> {
        if self.interactive {
            Box::new(TerminalChooser)
        } else {
            Box::new(RejectAmbiguous)
        }
    }
}
