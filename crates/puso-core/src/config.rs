//! Configuration types for puso.

use crate::policy::RulePolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for puso.
///
/// ```toml
/// preset = "standard"
/// deny = ["no-dynamic-eval"]
///
/// [rules.import-style]
/// require_alias_length = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "standard", "gated", "one-line", "dense").
    #[serde(default)]
    pub preset: Option<String>,

    /// Only run these rules (names or codes). Exclusive with `deny`.
    #[serde(default)]
    pub allow: Option<Vec<String>>,

    /// Run every rule except these (names or codes). Exclusive with `allow`.
    #[serde(default)]
    pub deny: Option<Vec<String>>,

    /// Per-rule options.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// A file named `pyproject.toml` is read from its `[tool.puso]` table;
    /// a missing table yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if path.file_name().is_some_and(|n| n == "pyproject.toml") {
            return Ok(Self::from_pyproject(&content)?.unwrap_or_default());
        }
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Extracts the `[tool.puso]` table of a `pyproject.toml`.
    ///
    /// Returns `Ok(None)` when the table is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML or the table is invalid.
    pub fn from_pyproject(content: &str) -> Result<Option<Self>, ConfigError> {
        let table: toml::Table = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        let Some(section) = table.get("tool").and_then(|tool| tool.get("puso")) else {
            return Ok(None);
        };
        section
            .clone()
            .try_into()
            .map(Some)
            .map_err(|e: toml::de::Error| ConfigError::Parse {
                message: format!("[tool.puso]: {e}"),
            })
    }

    /// Builds the rule policy from `allow` / `deny`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConflictingPolicy`] when both are set.
    pub fn policy(&self) -> Result<RulePolicy, ConfigError> {
        RulePolicy::from_lists(self.allow.as_deref(), self.deny.as_deref())
    }

    /// Gets the options of a rule, if any were configured.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Gets a boolean rule option with a default value.
    #[must_use]
    pub fn rule_bool(&self, rule_name: &str, key: &str, default: bool) -> bool {
        self.rule_config(rule_name)
            .map_or(default, |c| c.get_bool(key, default))
    }

    /// Gets a string rule option with a default value.
    #[must_use]
    pub fn rule_str<'a>(&'a self, rule_name: &str, key: &str, default: &'a str) -> &'a str {
        self.rule_config(rule_name)
            .map_or(default, |c| c.get_str(key, default))
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Both an allow list and a deny list were given.
    #[error("`allow` and `deny` are mutually exclusive")]
    ConflictingPolicy,

    /// The configured preset does not exist.
    #[error("Unknown preset `{name}`")]
    UnknownPreset {
        /// Preset name as configured.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyMode;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.preset.is_none());
        assert!(config.rules.is_empty());
        assert_eq!(
            config.policy().map(|p| p.mode()).ok(),
            Some(PolicyMode::AllEnabled)
        );
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "one-line"
deny = ["no-dynamic-eval"]

[rules.import-style]
require_alias_length = false

[rules.import-gating]
self_module = "sanity"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("one-line"));
        assert_eq!(
            config.policy().map(|p| p.mode()).ok(),
            Some(PolicyMode::DenyList)
        );
        assert!(!config.rule_bool("import-style", "require_alias_length", true));
        assert!(config.rule_bool("single-statement", "strict", true));
        assert_eq!(
            config.rule_str("import-gating", "self_module", "puso"),
            "sanity"
        );
    }

    #[test]
    fn test_conflicting_lists_rejected() {
        let config = Config::parse("allow = [\"a\"]\ndeny = [\"b\"]").expect("Failed to parse");
        assert!(matches!(config.policy(), Err(ConfigError::ConflictingPolicy)));
    }

    #[test]
    fn test_pyproject_section() {
        let content = r#"
[project]
name = "demo"

[tool.puso]
preset = "gated"
"#;
        let config = Config::from_pyproject(content)
            .expect("Failed to parse")
            .expect("section present");
        assert_eq!(config.preset.as_deref(), Some("gated"));

        let missing = Config::from_pyproject("[project]\nname = \"demo\"").expect("Failed to parse");
        assert!(missing.is_none());
    }
}
