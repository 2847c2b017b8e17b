//! Locate the task store for an invocation.
//!
//! Precedence: `--file` > `--global` > `--project` > nearest `.togo` marker
//! in the working directory or an ancestor > global store.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::Storage;

/// Name of the project-local store file
pub const PROJECT_FILE_NAME: &str = ".togo";

/// Name of the global data directory under the home directory
pub const GLOBAL_DIR_NAME: &str = ".togo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Project,
    Global,
    File,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Project => "project",
            SourceKind::Global => "global",
            SourceKind::File => "file",
        }
    }
}

/// A resolved store location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub kind: SourceKind,
    pub path: PathBuf,
}

impl Source {
    pub fn storage(&self) -> Storage {
        Storage::new(&self.path)
    }
}

/// Inputs to source resolution
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Global data directory override (`--home` / `TOGO_HOME`)
    pub home: Option<PathBuf>,
    pub cwd: PathBuf,
    pub file: Option<PathBuf>,
    pub global: bool,
    pub project: bool,
}

/// Directory holding the global store and `config.toml`
pub fn global_root(home: Option<&Path>) -> Result<PathBuf> {
    if let Some(home) = home {
        return Ok(home.to_path_buf());
    }
    let dirs = directories::BaseDirs::new().ok_or(Error::NoHomeDir)?;
    Ok(dirs.home_dir().join(GLOBAL_DIR_NAME))
}

/// Nearest `.togo` regular file in `start` or one of its ancestors
pub fn find_project_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Resolve the store location for this invocation.
pub fn resolve(options: &SourceOptions, config: &Config) -> Result<Source> {
    if let Some(file) = &options.file {
        let path = if file.is_absolute() {
            file.clone()
        } else {
            options.cwd.join(file)
        };
        tracing::debug!(path = %path.display(), "using explicit store file");
        return Ok(Source {
            kind: SourceKind::File,
            path,
        });
    }

    if !options.global {
        match find_project_file(&options.cwd) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using project store");
                return Ok(Source {
                    kind: SourceKind::Project,
                    path,
                });
            }
            None if options.project => {
                return Err(Error::ProjectNotFound(options.cwd.clone()));
            }
            None => {}
        }
    }

    let path = global_root(options.home.as_deref())?.join(&config.file_name);
    tracing::debug!(path = %path.display(), "using global store");
    Ok(Source {
        kind: SourceKind::Global,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        home: PathBuf,
        work: PathBuf,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let work = temp.path().join("work/app/src");
        fs::create_dir_all(&work).unwrap();
        Fixture {
            home,
            work,
            _temp: temp,
        }
    }

    fn options(fx: &Fixture) -> SourceOptions {
        SourceOptions {
            home: Some(fx.home.clone()),
            cwd: fx.work.clone(),
            ..SourceOptions::default()
        }
    }

    #[test]
    fn falls_back_to_global() {
        let fx = fixture();
        let source = resolve(&options(&fx), &Config::default()).unwrap();
        assert_eq!(source.kind, SourceKind::Global);
        assert_eq!(source.path, fx.home.join("todos.json"));
    }

    #[test]
    fn global_honors_configured_file_name() {
        let fx = fixture();
        let config = Config {
            file_name: "work.json".to_string(),
            ..Config::default()
        };
        let source = resolve(&options(&fx), &config).unwrap();
        assert_eq!(source.path, fx.home.join("work.json"));
    }

    #[test]
    fn nearest_project_marker_wins() {
        let fx = fixture();
        let outer = fx.work.parent().unwrap().parent().unwrap().join(".togo");
        let inner = fx.work.parent().unwrap().join(".togo");
        fs::write(&outer, "").unwrap();
        fs::write(&inner, "").unwrap();

        let source = resolve(&options(&fx), &Config::default()).unwrap();
        assert_eq!(source.kind, SourceKind::Project);
        assert_eq!(source.path, inner);
    }

    #[test]
    fn marker_directory_is_ignored() {
        let fx = fixture();
        fs::create_dir_all(fx.work.join(".togo")).unwrap();
        let source = resolve(&options(&fx), &Config::default()).unwrap();
        assert_eq!(source.kind, SourceKind::Global);
    }

    #[test]
    fn global_flag_skips_project() {
        let fx = fixture();
        fs::write(fx.work.join(".togo"), "").unwrap();
        let opts = SourceOptions {
            global: true,
            ..options(&fx)
        };
        let source = resolve(&opts, &Config::default()).unwrap();
        assert_eq!(source.kind, SourceKind::Global);
    }

    #[test]
    fn project_flag_requires_marker() {
        let fx = fixture();
        let opts = SourceOptions {
            project: true,
            ..options(&fx)
        };
        let err = resolve(&opts, &Config::default()).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(_)));
        assert_eq!(err.exit_code(), crate::error::exit_codes::USER_ERROR);
    }

    #[test]
    fn explicit_file_beats_everything() {
        let fx = fixture();
        fs::write(fx.work.join(".togo"), "").unwrap();
        let opts = SourceOptions {
            file: Some(PathBuf::from("lists/mine.json")),
            global: true,
            ..options(&fx)
        };
        let source = resolve(&opts, &Config::default()).unwrap();
        assert_eq!(source.kind, SourceKind::File);
        assert_eq!(source.path, fx.work.join("lists/mine.json"));
    }

    #[test]
    fn kind_labels() {
        assert_eq!(SourceKind::Project.label(), "project");
        assert_eq!(SourceKind::Global.label(), "global");
        assert_eq!(SourceKind::File.label(), "file");
    }
}
