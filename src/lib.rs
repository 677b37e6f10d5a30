//! Core Java Clippy engine and lint registry.
//!
//! The crate exposes a tree-sitter based `LintEngine` over Java source plus
//! the fix plumbing used by the CLI to apply suggested rewrites.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod fix;
pub mod fixer;
pub mod level;
pub mod lint;
pub mod parser;
pub mod rules;
pub mod telemetry;
pub mod visitor;

use anyhow::Result;
use tree_sitter::Tree;

use crate::config::ParameterLimit;
use crate::diagnostics::Diagnostic;
use crate::lint::{LintContext, LintRegistry, LintSettings};
use crate::parser::parse_source;

/// Engine orchestrates linting by parsing source and running registered rules.
pub struct LintEngine {
    registry: LintRegistry,
    settings: LintSettings,
}

impl LintEngine {
    /// Create a new engine with default lint settings.
    pub fn new(registry: LintRegistry) -> Self {
        Self {
            registry,
            settings: LintSettings::default(),
        }
    }

    /// Create a new engine with explicit lint settings (e.g. from config).
    pub fn new_with_settings(registry: LintRegistry, settings: LintSettings) -> Self {
        Self { registry, settings }
    }

    /// Lint a single in-memory source string and return diagnostics.
    pub fn lint_source(&self, source: &str) -> Result<Vec<Diagnostic>> {
        let tree = parse_source(source)?;
        self.run_rules(source, &tree)
    }

    fn run_rules(&self, source: &str, tree: &Tree) -> Result<Vec<Diagnostic>> {
        let mut ctx = LintContext::new(source, self.settings.clone());
        let root = tree.root_node();

        for rule in self.registry.rules() {
            rule.check(root, source, &mut ctx);
        }

        Ok(ctx.into_diagnostics())
    }
}

/// Construct a `LintEngine` with all built-in lints enabled.
///
/// The constructor parameter limit is resolved from the environment exactly
/// once, here; everything downstream receives it as an immutable value.
pub fn create_default_engine() -> LintEngine {
    let limit = ParameterLimit::from_env();
    LintEngine::new(LintRegistry::default_rules(limit))
}
