use anyhow::{Context, Result};
use tree_sitter::{Language, Parser, Tree};

fn java_language() -> Language {
    tree_sitter_java::language()
}

pub fn parse_source(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(java_language())
        .context("failed to load Java grammar")?;

    parser
        .parse(source, None)
        .context("tree-sitter failed to parse source")
}
