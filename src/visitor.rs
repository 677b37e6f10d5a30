use crate::lint::LintContext;
use tree_sitter::Node;

/// Callback interface for syntax-driven rules.
///
/// The traversal is owned by `walk_tree`; rules only see the node kinds they
/// register an interest in. Nested classes are reported as their own
/// `visit_class` calls, so a rule never has to recurse into class bodies to
/// find further classes.
pub trait JavaVisitor {
    fn visit_class(&mut self, _node: Node, _ctx: &mut LintContext<'_>) {}
}

pub fn walk_tree(root: Node, visitor: &mut impl JavaVisitor, ctx: &mut LintContext<'_>) {
    walk_node(root, visitor, ctx);
}

fn walk_node(node: Node, visitor: &mut impl JavaVisitor, ctx: &mut LintContext<'_>) {
    if node.kind() == "class_declaration" {
        visitor.visit_class(node, ctx);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_node(child, visitor, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{LintContext, LintSettings};
    use crate::parser::parse_source;

    struct ClassCounter {
        names: Vec<String>,
    }

    impl JavaVisitor for ClassCounter {
        fn visit_class(&mut self, node: Node, ctx: &mut LintContext<'_>) {
            if let Some(name) = node.child_by_field_name("name") {
                self.names
                    .push(ctx.source()[name.byte_range()].to_string());
            }
        }
    }

    #[test]
    fn visits_top_level_and_nested_classes() {
        let src = r#"
class Outer {
    static class Inner {
    }
}

class Sibling {
}
"#;

        let tree = parse_source(src).expect("parse should succeed");
        let mut ctx = LintContext::new(src, LintSettings::default());
        let mut counter = ClassCounter { names: Vec::new() };

        walk_tree(tree.root_node(), &mut counter, &mut ctx);

        assert_eq!(counter.names, vec!["Outer", "Inner", "Sibling"]);
    }

    #[test]
    fn interfaces_and_enums_are_not_visited() {
        let src = "interface I {}\nenum E { A }\n";

        let tree = parse_source(src).expect("parse should succeed");
        let mut ctx = LintContext::new(src, LintSettings::default());
        let mut counter = ClassCounter { names: Vec::new() };

        walk_tree(tree.root_node(), &mut counter, &mut ctx);

        assert!(counter.names.is_empty());
    }
}
