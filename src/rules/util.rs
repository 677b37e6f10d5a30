use tree_sitter::Node;

/// Source text covered by a node.
pub(crate) fn slice<'a>(source: &'a str, node: Node) -> &'a str {
    &source[node.byte_range()]
}
