//! Rule presets for the supported modes.

use crate::{
    import_gating, import_style, no_dynamic_eval, single_statement, ImportGating, ImportStyle,
    NoDynamicEval, NoWhitespace, RequireTerminator, SingleStatement,
};
use puso_core::{Config, RuleBox};
use std::fmt;
use std::str::FromStr;

/// Preset configurations for puso.
///
/// The order of the rules in a preset is the order they are evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Terminators, aliased imports and no dynamic evaluation.
    #[default]
    Standard,
    /// Like [`Preset::Standard`], but imports are banned instead of styled.
    Gated,
    /// The whole program on a single line.
    OneLine,
    /// No whitespace at all.
    Dense,
    /// Every rule, in code order.
    All,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Self; 5] = [
        Self::Standard,
        Self::Gated,
        Self::OneLine,
        Self::Dense,
        Self::All,
    ];

    /// Returns the preset name used in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Gated => "gated",
            Self::OneLine => "one-line",
            Self::Dense => "dense",
            Self::All => "all",
        }
    }

    /// Looks a preset up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Returns the rules for this preset, configured from `config`.
    #[must_use]
    pub fn rules(self, config: &Config) -> Vec<RuleBox> {
        match self {
            Self::Standard => vec![
                Box::new(no_dynamic_eval_from(config)),
                Box::new(import_style_from(config)),
                Box::new(RequireTerminator::new()),
            ],
            Self::Gated => vec![
                Box::new(no_dynamic_eval_from(config)),
                Box::new(import_gating_from(config)),
                Box::new(RequireTerminator::new()),
            ],
            Self::OneLine => vec![
                Box::new(single_statement_from(config)),
                Box::new(no_dynamic_eval_from(config)),
                Box::new(import_style_from(config)),
            ],
            Self::Dense => vec![Box::new(NoWhitespace::new())],
            Self::All => all_rules_from(config),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
            format!("unknown preset `{s}` (expected one of: {})", known.join(", "))
        })
    }
}

fn single_statement_from(config: &Config) -> SingleStatement {
    SingleStatement::new().strict(config.rule_bool(single_statement::NAME, "strict", false))
}

fn no_dynamic_eval_from(config: &Config) -> NoDynamicEval {
    NoDynamicEval::new().experimental_structural(config.rule_bool(
        no_dynamic_eval::NAME,
        "experimental_structural",
        false,
    ))
}

fn import_style_from(config: &Config) -> ImportStyle {
    ImportStyle::new().require_alias_length(config.rule_bool(
        import_style::NAME,
        "require_alias_length",
        true,
    ))
}

fn import_gating_from(config: &Config) -> ImportGating {
    ImportGating::new().self_module(config.rule_str(
        import_gating::NAME,
        "self_module",
        import_gating::DEFAULT_SELF_MODULE,
    ))
}

fn all_rules_from(config: &Config) -> Vec<RuleBox> {
    vec![
        Box::new(single_statement_from(config)),
        Box::new(NoWhitespace::new()),
        Box::new(no_dynamic_eval_from(config)),
        Box::new(import_style_from(config)),
        Box::new(import_gating_from(config)),
        Box::new(RequireTerminator::new()),
    ]
}

/// Returns all available rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    all_rules_from(&Config::default())
}
