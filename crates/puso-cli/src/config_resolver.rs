//! Locating the puso configuration for a run.
//!
//! `--config` wins outright. Otherwise the directory being checked is searched
//! for `puso.toml`, then `.puso.toml`, then a `pyproject.toml` that carries a
//! `[tool.puso]` table. A user-wide `config.toml` under `$PUSO_CONFIG_DIR`
//! (or `~/.puso`) comes last; with none of these the built-in defaults apply.

use std::path::{Path, PathBuf};

/// Where the configuration of a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`; not checked for existence here.
    Flag(PathBuf),
    /// A puso file or `pyproject.toml` next to the checked sources.
    Local(PathBuf),
    /// The user-wide file.
    Home(PathBuf),
    /// Nothing found.
    Builtin,
}

impl ConfigSource {
    /// File to load, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(p) | Self::Local(p) | Self::Home(p) => Some(p),
            Self::Builtin => None,
        }
    }

    /// Short label for log lines.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Flag(_) => "command line",
            Self::Local(_) => "project",
            Self::Home(_) => "user",
            Self::Builtin => "built-in defaults",
        }
    }
}

/// A file name looked up in the project directory, with the test it must pass.
struct Candidate {
    name: &'static str,
    accepts: fn(&Path) -> bool,
}

const LOCAL_CANDIDATES: &[Candidate] = &[
    Candidate {
        name: "puso.toml",
        accepts: Path::is_file,
    },
    Candidate {
        name: ".puso.toml",
        accepts: Path::is_file,
    },
    Candidate {
        name: "pyproject.toml",
        accepts: declares_tool_table,
    },
];

const HOME_FILE: &str = "config.toml";

const HOME_DIR_ENV: &str = "PUSO_CONFIG_DIR";

/// Picks the configuration for a run over `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, flag: Option<&Path>) -> ConfigSource {
    search(project_dir, flag, home_dir())
}

fn search(project_dir: &Path, flag: Option<&Path>, home: Option<PathBuf>) -> ConfigSource {
    if let Some(path) = flag {
        return ConfigSource::Flag(path.to_path_buf());
    }

    let local = LOCAL_CANDIDATES
        .iter()
        .map(|candidate| (project_dir.join(candidate.name), candidate.accepts))
        .find(|(path, accepts)| accepts(path));
    if let Some((path, _)) = local {
        tracing::debug!("Config file: {}", path.display());
        return ConfigSource::Local(path);
    }

    match home.map(|dir| dir.join(HOME_FILE)) {
        Some(path) if path.is_file() => {
            tracing::debug!("User config file: {}", path.display());
            ConfigSource::Home(path)
        }
        _ => ConfigSource::Builtin,
    }
}

/// True when `pyproject` parses as TOML and has a `tool.puso` key.
fn declares_tool_table(pyproject: &Path) -> bool {
    std::fs::read_to_string(pyproject)
        .ok()
        .and_then(|content| content.parse::<toml::Table>().ok())
        .is_some_and(|table| table.get("tool").and_then(|tool| tool.get("puso")).is_some())
}

/// Directory holding the user-wide config file.
fn home_dir() -> Option<PathBuf> {
    match std::env::var_os(HOME_DIR_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|home| home.join(".puso")),
    }
}
