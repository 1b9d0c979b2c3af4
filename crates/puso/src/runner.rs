//! Config-driven entry points.

use puso_core::{Config, ConfigError, Engine, StyleViolation};
use puso_rules::Preset;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Errors from a config-driven check.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The source could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The source broke a rule.
    #[error(transparent)]
    Violation(#[from] StyleViolation),
}

impl CheckError {
    /// Returns the violation, if this error is one.
    #[must_use]
    pub fn violation(&self) -> Option<&StyleViolation> {
        match self {
            Self::Violation(v) => Some(v),
            _ => None,
        }
    }
}

/// Resolves the configured preset, defaulting to [`Preset::Standard`].
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPreset`] for an unrecognized name.
pub fn resolve_preset(config: &Config) -> Result<Preset, ConfigError> {
    match config.preset.as_deref() {
        None => Ok(Preset::default()),
        Some(name) => Preset::from_name(name).ok_or_else(|| ConfigError::UnknownPreset {
            name: name.to_string(),
        }),
    }
}

/// Builds an engine from a configuration: the preset's rules, configured
/// from `[rules.<name>]`, filtered by `allow` / `deny`.
///
/// # Errors
///
/// Returns an error if the preset is unknown or both `allow` and `deny`
/// are set. Nothing has been scanned at that point.
pub fn engine_from_config(config: &Config) -> Result<Engine, ConfigError> {
    let policy = config.policy()?;
    let preset = resolve_preset(config)?;
    debug!("Using preset {}", preset);

    Ok(Engine::builder()
        .rules(preset.rules(config))
        .policy(policy)
        .build())
}

/// Checks source text.
///
/// # Errors
///
/// Returns [`CheckError::Violation`] with the first violation, or
/// [`CheckError::Config`] if the configuration is invalid.
pub fn check_source(source_id: &str, text: &str, config: &Config) -> Result<(), CheckError> {
    let engine = engine_from_config(config)?;
    engine.check_text(source_id, text)?;
    Ok(())
}

/// Reads and checks a file. The path is used as the source identifier.
///
/// # Errors
///
/// Returns [`CheckError::Io`] if the file cannot be read, otherwise as
/// [`check_source`].
pub fn check_file(path: &Path, config: &Config) -> Result<(), CheckError> {
    let text = std::fs::read_to_string(path).map_err(|e| CheckError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    check_source(&path.display().to_string(), &text, config)
}
