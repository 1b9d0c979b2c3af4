//! Rule enablement policy.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a [`RulePolicy`] reads its name set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyMode {
    /// Every registered rule runs.
    #[default]
    AllEnabled,
    /// Only the named rules run.
    AllowList,
    /// Every rule except the named ones runs.
    DenyList,
}

/// Decides which registered rules run. Immutable once built.
///
/// Names match either a rule's name or its code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulePolicy {
    mode: PolicyMode,
    names: BTreeSet<String>,
}

impl RulePolicy {
    /// A policy that enables every rule.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// A policy that enables only `names`.
    #[must_use]
    pub fn allow<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: PolicyMode::AllowList,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// A policy that enables everything except `names`.
    #[must_use]
    pub fn deny<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: PolicyMode::DenyList,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a policy from optional allow and deny lists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConflictingPolicy`] when both lists are given.
    pub fn from_lists(
        allow: Option<&[String]>,
        deny: Option<&[String]>,
    ) -> Result<Self, ConfigError> {
        match (allow, deny) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingPolicy),
            (Some(names), None) => Ok(Self::allow(names.iter().cloned())),
            (None, Some(names)) => Ok(Self::deny(names.iter().cloned())),
            (None, None) => Ok(Self::all()),
        }
    }

    /// The policy mode.
    #[must_use]
    pub fn mode(&self) -> PolicyMode {
        self.mode
    }

    /// The named rules, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns true if a rule with this name and code should run.
    #[must_use]
    pub fn is_enabled(&self, name: &str, code: &str) -> bool {
        let listed = self.names.contains(name) || self.names.contains(code);
        match self.mode {
            PolicyMode::AllEnabled => true,
            PolicyMode::AllowList => listed,
            PolicyMode::DenyList => !listed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_enables_everything() {
        let policy = RulePolicy::all();
        assert_eq!(policy.mode(), PolicyMode::AllEnabled);
        assert!(policy.is_enabled("import-style", "PS004"));
    }

    #[test]
    fn allow_list_by_name_or_code() {
        let policy = RulePolicy::allow(["import-style", "PS006"]);
        assert!(policy.is_enabled("import-style", "PS004"));
        assert!(policy.is_enabled("require-terminator", "PS006"));
        assert!(!policy.is_enabled("no-dynamic-eval", "PS003"));
    }

    #[test]
    fn deny_list_inverts() {
        let policy = RulePolicy::deny(["no-dynamic-eval"]);
        assert!(!policy.is_enabled("no-dynamic-eval", "PS003"));
        assert!(policy.is_enabled("import-style", "PS004"));
    }

    #[test]
    fn both_lists_conflict() {
        let allow = vec!["a".to_string()];
        let deny = vec!["b".to_string()];
        assert!(matches!(
            RulePolicy::from_lists(Some(&allow), Some(&deny)),
            Err(ConfigError::ConflictingPolicy)
        ));
        assert_eq!(
            RulePolicy::from_lists(None, Some(&deny)).map(|p| p.mode()).ok(),
            Some(PolicyMode::DenyList)
        );
        assert_eq!(
            RulePolicy::from_lists(None, None).ok(),
            Some(RulePolicy::all())
        );
    }
}
