//! Check command implementation.

use anyhow::{bail, Context, Result};
use puso::{Config, SourceLine};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Name of the rule `--strict` configures.
const SINGLE_STATEMENT: &str = "single-statement";

/// Path argument that reads the source from stdin.
const STDIN_PATH: &str = "-";

/// Arguments of `puso check`.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files or directories to check (`-` reads stdin)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Only run these rules (comma-separated names or codes)
    #[arg(long, conflicts_with = "deny")]
    pub allow: Option<String>,

    /// Run every rule except these (comma-separated names or codes)
    #[arg(long)]
    pub deny: Option<String>,

    /// Rule preset: standard, gated, one-line, dense or all
    #[arg(long)]
    pub preset: Option<String>,

    /// Reject any leading space after a separator in one-line mode
    #[arg(long)]
    pub strict: bool,

    /// Name shown in reports instead of the path (single source only)
    #[arg(long)]
    pub source_id: Option<String>,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,
}

/// Runs the check command.
///
/// Returns exit code 1 after printing the first violation.
pub fn run(args: &CheckArgs, explicit_config: Option<&Path>) -> Result<ExitCode> {
    let source = config_resolver::resolve(&project_dir(&args.paths), explicit_config);
    let mut config = load_config(&source)?;
    apply_overrides(&mut config, args);

    let engine = puso::engine_from_config(&config).context("Invalid configuration")?;
    tracing::info!(
        "Checking with {} rules: {}",
        engine.rule_count(),
        engine.rule_names().join(", ")
    );

    let inputs = if is_stdin(&args.paths) {
        vec![None]
    } else {
        discover_files(&args.paths, &args.exclude)?
            .into_iter()
            .map(Some)
            .collect()
    };

    if args.source_id.is_some() && inputs.len() > 1 {
        bail!("--source-id needs exactly one source, found {}", inputs.len());
    }

    for (checked, input) in inputs.iter().enumerate() {
        let (id, text) = read_input(input.as_deref())?;
        let id = args.source_id.clone().unwrap_or(id);
        let lines = SourceLine::from_text(&text);

        if let Err(violation) = engine.check(&id, &lines) {
            super::output::print_violation(&violation, &id, &lines, checked + 1, args.format)?;
            return Ok(ExitCode::from(1));
        }
    }

    super::output::print_clean(inputs.len(), args.format)?;
    Ok(ExitCode::SUCCESS)
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        tracing::debug!("No config file, using {}", source.label());
        return Ok(Config::default());
    };
    tracing::info!("Using {} config: {}", source.label(), path.display());
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Applies command-line flags on top of the file configuration.
fn apply_overrides(config: &mut Config, args: &CheckArgs) {
    if let Some(preset) = &args.preset {
        config.preset = Some(preset.clone());
    }
    if let Some(allow) = &args.allow {
        config.allow = Some(split_list(allow));
        config.deny = None;
    }
    if let Some(deny) = &args.deny {
        config.deny = Some(split_list(deny));
        config.allow = None;
    }
    if args.strict {
        config
            .rules
            .entry(SINGLE_STATEMENT.to_string())
            .or_default()
            .options
            .insert("strict".to_string(), toml::Value::Boolean(true));
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn is_stdin(paths: &[PathBuf]) -> bool {
    matches!(paths, [p] if p.as_os_str() == STDIN_PATH)
}

/// Directory that project configuration is looked up in.
fn project_dir(paths: &[PathBuf]) -> PathBuf {
    match paths.first() {
        Some(p) if p.is_dir() => p.clone(),
        Some(p) => p
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        None => PathBuf::from("."),
    }
}

fn read_input(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(("<stdin>".to_string(), text))
        }
    }
}

/// Collects the Python files to check, in sorted order.
///
/// Explicit files are taken as given; directories are walked for `*.py`
/// with `.gitignore` respected.
fn discover_files(paths: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.exists() {
            bail!("No such file or directory: {}", root.display());
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder.hidden(false).git_ignore(true);

        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("py") {
                continue;
            }

            let rel_str = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
            let excluded = exclude.iter().any(|pattern| {
                let clean = pattern.replace("**/", "").replace("/**", "");
                !clean.is_empty() && rel_str.contains(&clean)
            });

            if !excluded {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!("Discovered {} source(s)", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: CheckArgs,
    }

    fn parse(argv: &[&str]) -> CheckArgs {
        TestCli::parse_from(std::iter::once("puso").chain(argv.iter().copied())).args
    }

    #[test]
    fn split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list(" PS001, no-whitespace ,,"),
            vec!["PS001".to_string(), "no-whitespace".to_string()]
        );
    }

    #[test]
    fn flags_override_file_policy() {
        let mut config = Config::parse("deny = [\"PS003\"]\npreset = \"gated\"").unwrap();
        apply_overrides(&mut config, &parse(&["--allow", "PS006", "--preset", "dense"]));
        assert_eq!(config.allow, Some(vec!["PS006".to_string()]));
        assert!(config.deny.is_none());
        assert_eq!(config.preset.as_deref(), Some("dense"));
    }

    #[test]
    fn strict_flag_sets_rule_option() {
        let mut config = Config::default();
        apply_overrides(&mut config, &parse(&["--strict"]));
        assert!(config.rule_bool(SINGLE_STATEMENT, "strict", false));
    }

    #[test]
    fn allow_and_deny_flags_conflict() {
        let result = TestCli::try_parse_from(["puso", "--allow", "a", "--deny", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn stdin_is_a_lone_dash() {
        assert!(is_stdin(&[PathBuf::from("-")]));
        assert!(!is_stdin(&[PathBuf::from("-"), PathBuf::from("a.py")]));
        assert!(!is_stdin(&[PathBuf::from(".")]));
    }

    #[test]
    fn discovers_python_files_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("pkg")).unwrap();
        fs::write(tmp.path().join("pkg/b.py"), "").unwrap();
        fs::write(tmp.path().join("a.py"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let files = discover_files(&[tmp.path().to_path_buf()], &[]).unwrap();
        assert_eq!(
            files,
            vec![tmp.path().join("a.py"), tmp.path().join("pkg/b.py")]
        );

        let files = discover_files(&[tmp.path().to_path_buf()], &["pkg/**".to_string()]).unwrap();
        assert_eq!(files, vec![tmp.path().join("a.py")]);
    }

    #[test]
    fn explicit_file_is_kept_and_missing_path_fails() {
        let tmp = TempDir::new().unwrap();
        let script = tmp.path().join("script.txt");
        fs::write(&script, "x = 1;").unwrap();

        let files = discover_files(&[script.clone()], &[]).unwrap();
        assert_eq!(files, vec![script]);
        assert!(discover_files(&[tmp.path().join("missing")], &[]).is_err());
    }

    #[test]
    fn project_dir_of_file_is_its_parent() {
        let tmp = TempDir::new().unwrap();
        let script = tmp.path().join("a.py");
        fs::write(&script, "").unwrap();
        assert_eq!(project_dir(&[script]), tmp.path().to_path_buf());
        assert_eq!(project_dir(&[tmp.path().to_path_buf()]), tmp.path().to_path_buf());
        assert_eq!(project_dir(&[PathBuf::from("a.py")]), PathBuf::from("."));
    }
}
