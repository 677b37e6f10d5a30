//! Builder-pattern source generation.
//!
//! The output layout is a golden contract: consumers apply the generated text
//! over the original constructor without reformatting, so every tab and blank
//! line below is load-bearing. Field declarations, setters, and forwarding
//! assignments always appear in the constructor's declared parameter order.

use std::fmt::Write;

/// Single constructor parameter as written in source.
///
/// `type_text` keeps the source-level spelling verbatim, including generic
/// arguments; no normalization happens anywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_text: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
        }
    }
}

/// Render the builder-pattern replacement for a constructor.
///
/// Pure function of its inputs; identical inputs yield byte-identical output.
/// The text contains, in order: a private constructor taking a `Builder`, and
/// a nested `public static class Builder` with one private field and one
/// fluent setter per parameter, a no-argument constructor, and a `build()`
/// method calling the new private constructor.
pub fn builder_pattern_text(owner: &str, parameters: &[Parameter]) -> String {
    let mut out = String::new();
    out.push_str(&private_constructor_text(owner, parameters));
    out.push_str(&builder_class_text(owner, parameters));
    out
}

fn private_constructor_text(owner: &str, parameters: &[Parameter]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "private {owner}(Builder builder) {{");
    for p in parameters {
        let _ = writeln!(out, "\t\tthis.{0} = builder.{0};", p.name);
    }
    out.push_str("\t}\n");
    out.push('\n');

    out
}

fn builder_class_text(owner: &str, parameters: &[Parameter]) -> String {
    let mut out = String::new();

    out.push_str("\tpublic static class Builder {\n");
    out.push_str(&fields_text(parameters));
    out.push_str(&builder_constructor_text());
    out.push_str(&setters_text(parameters));
    out.push_str(&build_method_text(owner));
    out.push_str("\t}\n");

    out
}

fn fields_text(parameters: &[Parameter]) -> String {
    let mut out = String::new();

    for p in parameters {
        let _ = writeln!(out, "\t\tprivate {} {};", p.type_text, p.name);
    }
    out.push('\n');

    out
}

fn builder_constructor_text() -> String {
    "\t\tpublic Builder() {\n\t\t}\n\n".to_string()
}

fn setters_text(parameters: &[Parameter]) -> String {
    let mut out = String::new();

    for p in parameters {
        let _ = writeln!(out, "\t\tpublic Builder {0}({1} {0}) {{", p.name, p.type_text);
        let _ = writeln!(out, "\t\t\tthis.{0} = {0};", p.name);
        out.push_str("\t\t\treturn this;\n");
        out.push_str("\t\t}\n");
        out.push('\n');
    }

    out
}

fn build_method_text(owner: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\t\tpublic {owner} build() {{");
    let _ = writeln!(out, "\t\t\treturn new {owner}(this);");
    out.push_str("\t\t}\n");
    out.push('\n');

    out
}
