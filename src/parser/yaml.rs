//! Tree-sitter helpers shared by the pubspec parsers

use crate::parser::traits::ParseError;
use crate::parser::types::VersionConstraint;
use tracing::warn;

/// Parse YAML content, rejecting empty and syntactically broken documents
pub(crate) fn parse_document(content: &str) -> Result<tree_sitter::Tree, ParseError> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    let mut parser = tree_sitter::Parser::new();
    let language = tree_sitter_yaml::LANGUAGE;
    parser.set_language(&language.into()).map_err(|e| {
        warn!("Failed to set YAML language for tree-sitter: {}", e);
        ParseError::TreeSitter(e.to_string())
    })?;

    let tree = parser.parse(content, None).ok_or_else(|| {
        warn!("Failed to parse YAML content");
        ParseError::InvalidSyntax("Failed to parse YAML".to_string())
    })?;

    if tree.root_node().has_error() {
        warn!("YAML document contains syntax errors");
        return Err(ParseError::InvalidSyntax("Malformed YAML".to_string()));
    }

    Ok(tree)
}

/// Find the mapping a node stands for, looking through document and node wrappers
///
/// Only descends through wrappers, so nested mappings of sibling keys are
/// never returned.
pub(crate) fn find_mapping(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    match node.kind() {
        "block_mapping" | "flow_mapping" => Some(node),
        "stream" | "document" | "block_node" | "flow_node" => {
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            children.into_iter().find_map(find_mapping)
        }
        _ => None,
    }
}

/// Find the value node of `key` in a block or flow mapping
pub(crate) fn mapping_value<'tree>(
    mapping: tree_sitter::Node<'tree>,
    content: &str,
    key: &str,
) -> Option<tree_sitter::Node<'tree>> {
    let mut cursor = mapping.walk();
    let pairs: Vec<_> = mapping.children(&mut cursor).collect();

    pairs
        .into_iter()
        .filter(|pair| matches!(pair.kind(), "block_mapping_pair" | "flow_pair"))
        .find(|pair| {
            pair.child_by_field_name("key")
                .is_some_and(|key_node| get_node_text(key_node, content) == key)
        })
        .and_then(|pair| pair.child_by_field_name("value"))
}

/// Find the mapping held by a top-level section such as `sdks` or `environment`
///
/// A missing or null section declares nothing. Any other non-mapping value
/// is rejected.
pub(crate) fn section_mapping<'tree>(
    root: tree_sitter::Node<'tree>,
    content: &str,
    key: &str,
) -> Result<Option<tree_sitter::Node<'tree>>, ParseError> {
    let Some(value_node) = mapping_value(root, content, key) else {
        return Ok(None);
    };

    if let Some(mapping) = find_mapping(value_node) {
        return Ok(Some(mapping));
    }

    if is_null(&get_node_text(value_node, content)) {
        return Ok(None);
    }

    warn!("YAML section {} is not a mapping", key);
    Err(ParseError::InvalidSyntax(format!(
        "\"{}\" must be a mapping",
        key
    )))
}

fn is_null(value: &str) -> bool {
    value.is_empty() || value == "null" || value == "~"
}

/// Read an SDK entry (`dart: ">=2.19.6 <3.0.0"`) from a mapping
///
/// Missing keys and null values declare nothing.
pub(crate) fn sdk_entry(
    mapping: tree_sitter::Node,
    content: &str,
    key: &str,
) -> Result<Option<VersionConstraint>, ParseError> {
    let Some(value_node) = mapping_value(mapping, content, key) else {
        return Ok(None);
    };

    let value = get_node_text(value_node, content);
    if is_null(&value) {
        return Ok(None);
    }

    VersionConstraint::parse(&value)
        .map(Some)
        .ok_or(ParseError::InvalidConstraint(value))
}

/// Get text content of a node, removing quotes if present
pub(crate) fn get_node_text(node: tree_sitter::Node, content: &str) -> String {
    let text = content[node.byte_range()].trim();
    let unquoted = if text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')))
    {
        &text[1..text.len() - 1]
    } else {
        text
    };
    unquoted.trim().to_string()
}
