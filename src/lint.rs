use crate::config::ParameterLimit;
use crate::diagnostics::{Diagnostic, Span};
use crate::level::LintLevel;
use anyhow::{Result, anyhow};
use std::collections::{HashMap, HashSet};
use tree_sitter::Node;

/// High-level categories used to group lints, mirroring the categories IDE
/// analysis frontends present to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LintCategory {
    Correctness,
    Security,
    Performance,
    Usability,
}

impl LintCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintCategory::Correctness => "correctness",
            LintCategory::Security => "security",
            LintCategory::Performance => "performance",
            LintCategory::Usability => "usability",
        }
    }
}

/// Scope of source a rule needs to see at once.
///
/// Every current rule works one Java file at a time; the variant exists so the
/// restriction is part of the rule's published metadata rather than an
/// unstated assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintScope {
    JavaFile,
}

impl LintScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintScope::JavaFile => "java-file",
        }
    }
}

/// Safety classification for auto-fixes.
///
/// - `Safe` fixes preserve runtime behavior exactly
/// - `Unsafe` fixes may change runtime behavior and require explicit opt-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FixSafety {
    #[default]
    Safe,
    Unsafe,
}

impl FixSafety {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixSafety::Safe => "safe",
            FixSafety::Unsafe => "unsafe",
        }
    }
}

/// Descriptor for an auto-fix associated with a lint rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixDescriptor {
    /// Whether an auto-fix is available for this lint.
    pub available: bool,
    /// Safety classification of the fix.
    pub safety: FixSafety,
    /// Human-readable description of what the fix does.
    pub description: &'static str,
}

impl FixDescriptor {
    /// Create a safe fix descriptor.
    pub const fn safe(description: &'static str) -> Self {
        Self {
            available: true,
            safety: FixSafety::Safe,
            description,
        }
    }

    /// Create an unsafe fix descriptor.
    pub const fn unsafe_fix(description: &'static str) -> Self {
        Self {
            available: true,
            safety: FixSafety::Unsafe,
            description,
        }
    }

    /// Indicate no fix is available.
    pub const fn none() -> Self {
        Self {
            available: false,
            safety: FixSafety::Safe,
            description: "",
        }
    }
}

/// Static metadata describing a lint rule.
///
/// `description` is the short title shown next to each finding; `explanation`
/// is the long-form text surfaced by `explain`. `priority` ranks the rule
/// within its category (10 = most urgent), and `severity` is the level a
/// finding carries unless a config file overrides it.
#[derive(Debug)]
pub struct LintDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub explanation: &'static str,
    pub category: LintCategory,
    pub priority: u8,
    pub severity: LintLevel,
    pub scope: LintScope,
    pub fix: FixDescriptor,
}

/// A single lint rule that can inspect a syntax tree.
pub trait LintRule: Send + Sync {
    fn descriptor(&self) -> &'static LintDescriptor;
    fn check(&self, root: Node, source: &str, ctx: &mut LintContext<'_>);
}

/// Per-lint configuration derived from `java-clippy.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintSettings {
    levels: HashMap<String, LintLevel>,
}

impl LintSettings {
    #[must_use]
    pub fn with_config_levels(mut self, levels: HashMap<String, LintLevel>) -> Self {
        self.levels.extend(levels);
        self
    }

    #[must_use]
    pub fn disable(mut self, disabled: impl IntoIterator<Item = String>) -> Self {
        for name in disabled {
            self.levels.insert(name, LintLevel::Allow);
        }
        self
    }

    /// Configured level for a lint, or the rule's own default severity.
    pub fn level_for(&self, lint: &'static LintDescriptor) -> LintLevel {
        self.levels.get(lint.name).copied().unwrap_or(lint.severity)
    }
}

/// Mutable context passed to lint rules while traversing a file.
pub struct LintContext<'src> {
    source: &'src str,
    settings: LintSettings,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> LintContext<'src> {
    pub fn new(source: &'src str, settings: LintSettings) -> Self {
        Self {
            source,
            settings,
            diagnostics: Vec::new(),
        }
    }

    /// Report a plain finding anchored to a node.
    pub fn report_node(
        &mut self,
        lint: &'static LintDescriptor,
        node: Node,
        message: impl Into<String>,
    ) {
        let level = self.settings.level_for(lint);
        if level == LintLevel::Allow {
            return;
        }

        self.diagnostics.push(Diagnostic {
            lint,
            level,
            file: None,
            span: Span::from_range(node.range()),
            message: message.into(),
            help: None,
            suggestion: None,
        });
    }

    /// Report an already-constructed diagnostic, resolving its level from the
    /// settings. Rules that attach suggestions build the `Diagnostic` directly
    /// and hand it off here.
    pub fn report_diagnostic(&mut self, mut diagnostic: Diagnostic) {
        let level = self.settings.level_for(diagnostic.lint);
        if level == LintLevel::Allow {
            return;
        }

        diagnostic.level = level;
        self.diagnostics.push(diagnostic);
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn settings(&self) -> &LintSettings {
        &self.settings
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Registry of lint rules, exposed to the host application at startup.
pub struct LintRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl std::fmt::Debug for LintRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintRegistry")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| r.descriptor().name)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl LintRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl LintRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = &Box<dyn LintRule>> {
        self.rules.iter()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &'static LintDescriptor> + '_ {
        self.rules.iter().map(|r| r.descriptor())
    }

    pub fn find_descriptor(&self, name: &str) -> Option<&'static LintDescriptor> {
        self.descriptors().find(|d| d.name == name)
    }

    /// Every built-in rule, constructed against the given parameter limit.
    #[must_use = "registry should be used to create an engine"]
    pub fn default_rules(limit: ParameterLimit) -> Self {
        Self::new().with_rule(crate::rules::TooManyParametersConstructorLint::new(limit))
    }

    /// Filter the default rules by name.
    ///
    /// # Errors
    ///
    /// Returns error if any lint name in `only`, `skip`, or `disabled` is unknown.
    pub fn default_rules_filtered(
        only: &[String],
        skip: &[String],
        disabled: &[String],
        limit: ParameterLimit,
    ) -> Result<Self> {
        let all = Self::default_rules(limit);
        let known: HashSet<&'static str> = all.descriptors().map(|d| d.name).collect();

        for n in only.iter().chain(skip.iter()).chain(disabled.iter()) {
            if !known.contains(n.as_str()) {
                return Err(anyhow!("unknown lint: {n}"));
            }
        }

        let only_set: Option<HashSet<&str>> = if only.is_empty() {
            None
        } else {
            Some(only.iter().map(|s| s.as_str()).collect())
        };
        let skip_set: HashSet<&str> = skip.iter().map(|s| s.as_str()).collect();
        let disabled_set: HashSet<&str> = disabled.iter().map(|s| s.as_str()).collect();

        let mut reg = Self::new();
        for rule in all.rules {
            let name = rule.descriptor().name;

            if let Some(ref only) = only_set
                && !only.contains(name)
            {
                continue;
            }
            if skip_set.contains(name) || disabled_set.contains(name) {
                continue;
            }

            reg.rules.push(rule);
        }

        Ok(reg)
    }
}

impl Default for LintRegistry {
    fn default() -> Self {
        Self::new()
    }
}
