//! FVM config parser
//!
//! Reads the Flutter SDK pinned by FVM. Two file layouts exist:
//! - FVM 3 `.fvmrc`: `{ "flutter": "3.19.0" }`
//! - FVM 2 `.fvm/fvm_config.json`: `{ "flutterSdkVersion": "3.7.12", "flavors": {} }`
//!
//! The value is either `X.Y.Z` or `X.Y.Z@channel`.

use crate::parser::traits::{ParseError, SdkVersionParser};
use crate::parser::types::{Channel, PinnedVersion};
use crate::version::semver::parse_exact_version;
use tracing::warn;

/// Keys holding the pinned version, most recent FVM layout first
const VERSION_KEYS: [&str; 2] = ["flutter", "flutterSdkVersion"];

/// Parser for FVM config files
pub struct FvmConfigParser;

impl FvmConfigParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FvmConfigParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SdkVersionParser for FvmConfigParser {
    type Output = Option<PinnedVersion>;

    fn parse(&self, content: &str) -> Result<Self::Output, ParseError> {
        if content.trim().is_empty() {
            return Err(ParseError::EmptyDocument);
        }

        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_json::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set JSON language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse JSON content");
            ParseError::InvalidSyntax("Failed to parse JSON".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            warn!("FVM config is not valid JSON");
            return Err(ParseError::InvalidSyntax("Malformed JSON".to_string()));
        }

        let mut cursor = root.walk();
        let values: Vec<_> = root
            .named_children(&mut cursor)
            .filter(|node| node.kind() != "comment")
            .collect();

        let [object] = values.as_slice() else {
            warn!("FVM config holds {} top-level values", values.len());
            return Err(ParseError::InvalidSyntax(
                "Expected a single JSON object".to_string(),
            ));
        };
        if object.kind() != "object" {
            return Err(ParseError::InvalidSyntax(
                "Expected a JSON object".to_string(),
            ));
        }
        let object = *object;

        for key in VERSION_KEYS {
            if let Some(value) = self.find_string_value(object, content, key)? {
                return parse_pinned_version(&value);
            }
        }

        Ok(None)
    }
}

impl FvmConfigParser {
    /// Find the string value of a top-level key
    fn find_string_value(
        &self,
        object_node: tree_sitter::Node,
        content: &str,
        key: &str,
    ) -> Result<Option<String>, ParseError> {
        let mut cursor = object_node.walk();

        for child in object_node.children(&mut cursor) {
            if child.kind() != "pair" {
                continue;
            }

            let Some(key_node) = child.child_by_field_name("key") else {
                continue;
            };

            if self.get_string_value(key_node, content) != key {
                continue;
            }

            let Some(value_node) = child.child_by_field_name("value") else {
                continue;
            };

            if value_node.kind() != "string" {
                return Err(ParseError::InvalidSyntax(format!(
                    "\"{}\" must be a string",
                    key
                )));
            }

            let value = self.get_string_value(value_node, content);
            return Ok((!value.is_empty()).then_some(value));
        }

        Ok(None)
    }

    /// Get the string value from a string node (removes quotes)
    fn get_string_value(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = &content[node.byte_range()];
        text.trim()
            .trim_start_matches('"')
            .trim_end_matches('"')
            .trim()
            .to_string()
    }
}

/// Parse `X.Y.Z` or `X.Y.Z@channel`
fn parse_pinned_version(value: &str) -> Result<Option<PinnedVersion>, ParseError> {
    let (version_part, channel_part) = match value.split_once('@') {
        Some((version, channel)) => (version, Some(channel)),
        None => (value, None),
    };

    let version = parse_exact_version(version_part)
        .ok_or_else(|| ParseError::InvalidVersion(version_part.to_string()))?;

    let channel = channel_part
        .map(|channel| {
            channel
                .parse::<Channel>()
                .map_err(|_| ParseError::InvalidChannel(channel.to_string()))
        })
        .transpose()?;

    Ok(Some(PinnedVersion { version, channel }))
}
