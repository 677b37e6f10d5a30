use crate::config::ParameterLimit;
use crate::diagnostics::{Applicability, Diagnostic, Span, Suggestion};
use crate::level::LintLevel;
use crate::lint::{
    FixDescriptor, LintCategory, LintContext, LintDescriptor, LintRule, LintScope,
};
use crate::visitor::{JavaVisitor, walk_tree};
use tree_sitter::Node;

use super::builder::{Parameter, builder_pattern_text};
use super::util::slice;

pub static TOO_MANY_PARAMETERS_CONSTRUCTOR: LintDescriptor = LintDescriptor {
    name: "TooManyParametersConstructor",
    description: "Constructor has too many parameters.",
    explanation: "Switching to build pattern improves readability and scalability.",
    category: LintCategory::Correctness,
    priority: 6,
    severity: LintLevel::Warn,
    scope: LintScope::JavaFile,
    fix: FixDescriptor::safe("Replace the constructor with a builder-pattern rewrite"),
};

/// Flags constructors whose parameter count exceeds the configured limit and
/// offers a builder-pattern rewrite as a machine-applicable fix.
pub struct TooManyParametersConstructorLint {
    limit: ParameterLimit,
}

impl TooManyParametersConstructorLint {
    pub fn new(limit: ParameterLimit) -> Self {
        Self { limit }
    }
}

impl LintRule for TooManyParametersConstructorLint {
    fn descriptor(&self) -> &'static LintDescriptor {
        &TOO_MANY_PARAMETERS_CONSTRUCTOR
    }

    fn check(&self, root: Node, source: &str, ctx: &mut LintContext<'_>) {
        let mut scanner = ConstructorScanner {
            limit: self.limit,
            source,
        };
        walk_tree(root, &mut scanner, ctx);
    }
}

/// One pass over a class body. No state survives between constructors or
/// between classes; each constructor is judged on its own parameter list.
struct ConstructorScanner<'src> {
    limit: ParameterLimit,
    source: &'src str,
}

impl JavaVisitor for ConstructorScanner<'_> {
    fn visit_class(&mut self, node: Node, ctx: &mut LintContext<'_>) {
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };

        // Direct children only: constructors of nested classes belong to the
        // visit_class call for the nested class itself.
        let mut cursor = body.walk();
        for member in body.children(&mut cursor) {
            if member.kind() == "constructor_declaration" {
                self.check_constructor(member, ctx);
            }
        }
    }
}

impl ConstructorScanner<'_> {
    fn check_constructor(&self, constructor: Node, ctx: &mut LintContext<'_>) {
        let Some(name) = constructor.child_by_field_name("name") else {
            return;
        };
        let Some(parameter_list) = constructor.child_by_field_name("parameters") else {
            return;
        };

        let parameters = collect_parameters(parameter_list, self.source);
        if parameters.len() <= self.limit.get() {
            return;
        }

        let owner = slice(self.source, name);
        let replacement = builder_pattern_text(owner, &parameters);

        ctx.report_diagnostic(Diagnostic {
            lint: &TOO_MANY_PARAMETERS_CONSTRUCTOR,
            level: TOO_MANY_PARAMETERS_CONSTRUCTOR.severity,
            file: None,
            span: Span::from_range(constructor.range()),
            message: TOO_MANY_PARAMETERS_CONSTRUCTOR.description.to_string(),
            help: Some(format!(
                "Replace `{owner}`'s constructor with a nested builder"
            )),
            suggestion: Some(Suggestion {
                message: format!("Rewrite `{owner}` to use the builder pattern"),
                replacement,
                applicability: Applicability::MachineApplicable,
            }),
        });
    }
}

/// Extract `(name, type)` pairs in declared order.
///
/// Only plain `formal_parameter` nodes count; varargs and receiver parameters
/// are outside what the rewrite handles.
fn collect_parameters(parameter_list: Node, source: &str) -> Vec<Parameter> {
    let mut out = Vec::new();

    let mut cursor = parameter_list.walk();
    for child in parameter_list.children(&mut cursor) {
        if child.kind() != "formal_parameter" {
            continue;
        }
        let Some(ty) = child.child_by_field_name("type") else {
            continue;
        };
        let Some(name) = child.child_by_field_name("name") else {
            continue;
        };

        out.push(Parameter::new(slice(source, name), slice(source, ty)));
    }

    out
}
