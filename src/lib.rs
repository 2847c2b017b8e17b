//! togo - a small personal task list
//!
//! This library provides the core functionality for the togo CLI: an
//! in-memory task store, free-form lookup of tasks by title or id, JSON
//! persistence, and a terminal browser.
//!
//! # Core Concepts
//!
//! - **Tasks**: id, title, completion, archive flag and creation time
//! - **Lookup**: exact title, then id, then substring with disambiguation
//! - **Sources**: a project `.togo` file or the global `~/.togo` store
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `config.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output envelopes
//! - `resolve`: Input to task resolution
//! - `source`: Store location discovery
//! - `storage`: JSON persistence with atomic writes
//! - `task`: Task model and store
//! - `ui`: Terminal browser and prompts

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod resolve;
pub mod source;
pub mod storage;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
