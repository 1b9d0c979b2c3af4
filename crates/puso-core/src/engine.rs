//! Rule engine: runs an ordered rule registry over one source.

use crate::context::ProgramContext;
use crate::policy::RulePolicy;
use crate::resolver::LogicalLineResolver;
use crate::rule::{Rule, RuleBox};
use crate::source::SourceLine;
use crate::types::{Finding, StyleViolation};

use tracing::{debug, warn};

/// Builder for configuring an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    rules: Vec<RuleBox>,
    policy: RulePolicy,
}

impl EngineBuilder {
    /// Creates a new builder with no rules and every rule enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Rules run in the order they were added.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends several boxed rules.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Sets the rule policy.
    #[must_use]
    pub fn policy(mut self, policy: RulePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the engine, keeping only the rules the policy enables.
    ///
    /// Policy names that match no registered rule are logged and ignored.
    #[must_use]
    pub fn build(self) -> Engine {
        for name in self.policy.names() {
            if !self
                .rules
                .iter()
                .any(|r| r.name() == name || r.code() == name)
            {
                warn!("Policy names a rule that is not registered: {}", name);
            }
        }

        let policy = self.policy;
        let rules = self
            .rules
            .into_iter()
            .filter(|rule| {
                let enabled = policy.is_enabled(rule.name(), rule.code());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        Engine { rules, policy }
    }
}

/// Runs enabled rules over a source and stops at the first violation.
///
/// Use [`Engine::builder()`] to construct an instance.
pub struct Engine {
    rules: Vec<RuleBox>,
    policy: RulePolicy,
}

impl Engine {
    /// Creates a new builder for configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Returns the number of enabled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Names of the enabled rules, in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// The policy the engine was built with.
    #[must_use]
    pub fn policy(&self) -> &RulePolicy {
        &self.policy
    }

    /// Checks a source given as text.
    ///
    /// # Errors
    ///
    /// Returns the first [`StyleViolation`] found.
    pub fn check_text(&self, source_id: &str, content: &str) -> Result<(), StyleViolation> {
        self.check(source_id, &SourceLine::from_text(content))
    }

    /// Checks a source given as physical lines.
    ///
    /// Program rules run first. Then every logical line is split into
    /// statements; each statement goes through every rule in order, and
    /// after the last statement the logical line itself does.
    ///
    /// # Errors
    ///
    /// Returns the first [`StyleViolation`] found, in line order and then
    /// rule order.
    pub fn check(&self, source_id: &str, lines: &[SourceLine]) -> Result<(), StyleViolation> {
        debug!(
            "Checking {} ({} lines, {} rules)",
            source_id,
            lines.len(),
            self.rules.len()
        );

        let ctx = ProgramContext::new(source_id, lines);
        for rule in &self.rules {
            if let Some(finding) = rule.check_program(&ctx) {
                return Err(violation(rule.as_ref(), finding, lines));
            }
        }

        for logical in LogicalLineResolver::new(lines) {
            for statement in logical.statements() {
                for rule in &self.rules {
                    if let Some(finding) = rule.check_statement(&statement) {
                        return Err(violation(rule.as_ref(), finding, lines));
                    }
                }
            }

            for rule in &self.rules {
                if let Some(finding) = rule.check_logical_line(&logical) {
                    return Err(violation(rule.as_ref(), finding, lines));
                }
            }
        }

        debug!("{} passed", source_id);
        Ok(())
    }
}

fn violation(rule: &dyn Rule, finding: Finding, lines: &[SourceLine]) -> StyleViolation {
    debug!(
        "{} reported line {} column {}",
        rule.name(),
        finding.line + 1,
        finding.column
    );

    let source_line = lines
        .iter()
        .find(|l| l.index == finding.line)
        .map(|l| l.trimmed().to_string())
        .unwrap_or_default();

    StyleViolation {
        code: rule.code().to_string(),
        rule: rule.name().to_string(),
        category: finding.category,
        message: finding.message,
        line: finding.line,
        column: finding.column,
        source_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{LogicalLine, Statement};
    use crate::types::Category;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Flags statements containing a marker word.
    struct Marker(&'static str, &'static str);

    impl Rule for Marker {
        fn name(&self) -> &'static str {
            self.0
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn check_statement(&self, stmt: &Statement<'_>) -> Option<Finding> {
            stmt.text.contains(self.1).then(|| {
                Finding::new(Category::BannedConstruct, stmt.line, stmt.column, self.1)
            })
        }
    }

    /// Flags logical lines whose closing line contains `!`.
    struct Bang;

    impl Rule for Bang {
        fn name(&self) -> &'static str {
            "bang"
        }
        fn code(&self) -> &'static str {
            "T002"
        }
        fn check_logical_line(&self, line: &LogicalLine<'_>) -> Option<Finding> {
            let closing = line.closing_line();
            closing
                .trimmed()
                .contains('!')
                .then(|| Finding::new(Category::Syntax, closing.index, 0, "bang"))
        }
    }

    /// Counts every statement it sees.
    struct Counter(Arc<AtomicUsize>);

    impl Rule for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }
        fn code(&self) -> &'static str {
            "T003"
        }
        fn check_statement(&self, _stmt: &Statement<'_>) -> Option<Finding> {
            self.0.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    #[test]
    fn passes_clean_source() {
        let engine = Engine::builder().rule(Marker("m", "boom")).build();
        assert!(engine.check_text("t.py", "x = 1\ny = 2").is_ok());
    }

    #[test]
    fn first_violation_in_line_order_wins() {
        let engine = Engine::builder()
            .rule(Marker("first", "beta"))
            .rule(Marker("second", "alpha"))
            .build();
        let err = engine
            .check_text("t.py", "x = alpha\ny = beta")
            .expect_err("should fail");
        assert_eq!(err.rule, "second");
        assert_eq!(err.line, 0);
    }

    #[test]
    fn rule_order_breaks_ties_within_a_statement() {
        let engine = Engine::builder()
            .rule(Marker("first", "x"))
            .rule(Marker("second", "y"))
            .build();
        let err = engine.check_text("t.py", "x = y").expect_err("should fail");
        assert_eq!(err.rule, "first");
    }

    #[test]
    fn stops_after_first_violation() {
        let seen = Arc::new(AtomicUsize::new(0));
        let engine = Engine::builder()
            .rule(Marker("m", "boom"))
            .rule(Counter(Arc::clone(&seen)))
            .build();
        let result = engine.check_text("t.py", "a = 1\nboom\nb = 2\nc = 3");
        assert!(result.is_err());
        // only the first statement reached the counter
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn statements_are_checked_before_their_logical_line() {
        let engine = Engine::builder()
            .rule(Bang)
            .rule(Marker("m", "boom"))
            .build();
        let err = engine
            .check_text("t.py", "boom; x = '!'")
            .expect_err("should fail");
        assert_eq!(err.rule, "m");
    }

    #[test]
    fn violation_carries_trimmed_source_line() {
        let engine = Engine::builder().rule(Marker("m", "boom")).build();
        let err = engine
            .check_text("t.py", "x = [\n    1,\n    boom()]")
            .expect_err("should fail");
        assert_eq!(err.line, 0);
        assert_eq!(err.source_line, "x = [");

        let err = engine
            .check_text("t.py", "a = 1;   boom()")
            .expect_err("should fail");
        assert_eq!((err.line, err.column), (0, 9));
        assert_eq!(err.source_line, "a = 1;   boom()");
    }

    #[test]
    fn policy_filters_rules() {
        let engine = Engine::builder()
            .rule(Marker("m", "boom"))
            .rule(Bang)
            .policy(RulePolicy::deny(["m"]))
            .build();
        assert_eq!(engine.rule_names(), vec!["bang"]);
        assert!(engine.check_text("t.py", "boom").is_ok());

        let engine = Engine::builder()
            .rule(Marker("m", "boom"))
            .rule(Bang)
            .policy(RulePolicy::allow(["T002", "unknown"]))
            .build();
        assert_eq!(engine.rule_count(), 1);
        assert!(engine.check_text("t.py", "x!").is_err());
    }
}
