use java_clippy::LintEngine;
use java_clippy::config::ParameterLimit;
use java_clippy::create_default_engine;
use java_clippy::level::LintLevel;
use java_clippy::lint::LintRegistry;

fn engine_with_limit(raw: Option<&str>) -> LintEngine {
    LintEngine::new(LintRegistry::default_rules(ParameterLimit::resolve(raw)))
}

#[test]
fn no_arg_constructor_is_clean() {
    let engine = create_default_engine();

    let src = r#"package test.pkg;
public class NoArgConstructorTestObject {
  public NoArgConstructorTestObject() {
    System.out.println("This is a no argument constructor");
  }
}"#;

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert!(diags.is_empty());
}

#[test]
fn single_parameter_constructor_is_clean() {
    let engine = create_default_engine();

    let src = r#"package test.pkg;
public class SingleParameterConstructorTestObject {
  public SingleParameterConstructorTestObject(int a) {
  }
}"#;

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert!(diags.is_empty());
}

#[test]
fn constructor_at_the_default_limit_is_clean() {
    let engine = create_default_engine();

    let src = r#"public class Pair {
  public Pair(int first, int second) {
  }
}"#;

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert!(diags.is_empty());
}

#[test]
fn three_parameter_constructor_is_flagged_once() {
    let engine = create_default_engine();

    let src = r#"package test.pkg;
public class ThreeParametersConstructorTestObject {
	public ThreeParametersConstructorTestObject(int a, long b, boolean c) {
	}
}"#;

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_eq!(diags.len(), 1);

    let diag = &diags[0];
    assert_eq!(diag.lint.name, "TooManyParametersConstructor");
    assert_eq!(diag.message, "Constructor has too many parameters.");
    assert_eq!(diag.level, LintLevel::Warn);
    assert_eq!(diag.span.start.row, 3);
}

#[test]
fn fix_text_covers_every_parameter_exactly_once_in_order() {
    let engine = create_default_engine();

    let src = r#"public class Foo {
	public Foo(int a, long b, boolean c) {
	}
}"#;

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_eq!(diags.len(), 1);

    let fix = &diags[0]
        .suggestion
        .as_ref()
        .expect("rule should attach a fix")
        .replacement;

    for (field, setter, assignment) in [
        ("\t\tprivate int a;\n", "public Builder a(int a)", "this.a = builder.a;"),
        ("\t\tprivate long b;\n", "public Builder b(long b)", "this.b = builder.b;"),
        (
            "\t\tprivate boolean c;\n",
            "public Builder c(boolean c)",
            "this.c = builder.c;",
        ),
    ] {
        assert_eq!(fix.matches(field).count(), 1, "field: {field:?}");
        assert_eq!(fix.matches(setter).count(), 1, "setter: {setter:?}");
        assert_eq!(fix.matches(assignment).count(), 1, "assignment: {assignment:?}");
    }

    let a = fix.find("private int a;").unwrap();
    let b = fix.find("private long b;").unwrap();
    let c = fix.find("private boolean c;").unwrap();
    assert!(a < b && b < c, "fields should keep declaration order");

    assert!(fix.contains("\t\tpublic Foo build() {\n\t\t\treturn new Foo(this);\n"));
}

#[test]
fn each_oversized_constructor_gets_its_own_finding() {
    let engine = create_default_engine();

    let src = r#"public class Overloaded {
	public Overloaded(int a, int b, int c) {
	}

	public Overloaded(String x, String y, String z, String w) {
	}
}"#;

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_eq!(diags.len(), 2);

    let first = &diags[0].suggestion.as_ref().unwrap().replacement;
    let second = &diags[1].suggestion.as_ref().unwrap().replacement;

    assert!(first.contains("private int a;"));
    assert!(!first.contains("private String x;"));
    assert!(second.contains("private String w;"));
    assert!(!second.contains("private int a;"));
}

#[test]
fn class_without_constructors_is_clean() {
    let engine = create_default_engine();

    let src = r#"public class Helpers {
  static int clamp(int value, int lo, int hi) {
    return Math.max(lo, Math.min(hi, value));
  }
}"#;

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert!(diags.is_empty());
}

#[test]
fn nested_class_constructors_are_scanned() {
    let engine = create_default_engine();

    let src = r#"public class Outer {
	public Outer() {
	}

	static class Inner {
		Inner(int a, int b, int c, int d) {
		}
	}
}"#;

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_eq!(diags.len(), 1);
    assert!(
        diags[0]
            .suggestion
            .as_ref()
            .unwrap()
            .replacement
            .starts_with("private Inner(Builder builder) {")
    );
}

#[test]
fn raised_limit_tolerates_wider_constructors() {
    let engine = engine_with_limit(Some("5"));

    let four = r#"class Foo { Foo(int a, int b, int c, int d) {} }"#;
    assert!(engine.lint_source(four).unwrap().is_empty());

    let six = r#"class Foo { Foo(int a, int b, int c, int d, int e, int f) {} }"#;
    assert_eq!(engine.lint_source(six).unwrap().len(), 1);
}

#[test]
fn non_numeric_limit_behaves_like_default() {
    let engine = engine_with_limit(Some("abc"));

    let three = r#"class Foo { Foo(int a, int b, int c) {} }"#;
    assert_eq!(engine.lint_source(three).unwrap().len(), 1);

    let two = r#"class Foo { Foo(int a, int b) {} }"#;
    assert!(engine.lint_source(two).unwrap().is_empty());
}

#[test]
fn generic_parameter_types_are_spelled_verbatim_in_the_fix() {
    let engine = create_default_engine();

    let src = r#"import java.util.List;
import java.util.Map;

public class Cache {
	public Cache(Map<String, List<Integer>> entries, int capacity, String name) {
	}
}"#;

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_eq!(diags.len(), 1);

    let fix = &diags[0].suggestion.as_ref().unwrap().replacement;
    assert!(fix.contains("private Map<String, List<Integer>> entries;"));
    assert!(fix.contains("public Builder entries(Map<String, List<Integer>> entries)"));
}
