//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# puso configuration

# Rule preset: standard, gated, one-line, dense or all
preset = "standard"

# Run only these rules (names or codes). Cannot be combined with `deny`.
# allow = ["PS003", "PS006"]

# Run every rule of the preset except these.
# deny = ["require-terminator"]

[rules.import-style]
# Aliases must be at least 2 * (len(module) + len(member)) characters
require_alias_length = true

# [rules.import-gating]
# self_module = "puso"

# [rules.single-statement]
# strict = false

# [rules.no-dynamic-eval]
# experimental_structural = false
"#;

/// Config file written by `puso init`.
pub const CONFIG_FILE: &str = "puso.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to pick a preset and configure rules");
    println!("  2. Run: puso check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use puso::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("standard"));
        assert!(config.rule_bool("import-style", "require_alias_length", false));
        assert!(puso::engine_from_config(&config).is_ok());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "preset = \"dense\"").unwrap();

        assert!(write_config(&path, false).is_err());
        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
