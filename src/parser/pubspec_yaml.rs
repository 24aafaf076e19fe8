//! pubspec.yaml parser
//!
//! Reads the package name and the SDK constraints of the `environment` section:
//!
//! ```yaml
//! name: my_app
//! environment:
//!   sdk: ">=2.19.6 <3.0.0"
//!   flutter: ^3.7.12
//! ```
//!
//! Only top-level keys are read: the `flutter:` section and
//! `dependencies.flutter` have nothing to do with the SDK constraint.

use crate::parser::traits::{ParseError, SdkVersionParser};
use crate::parser::types::SdkConstraints;
use crate::parser::yaml::{
    find_mapping, get_node_text, mapping_value, parse_document, sdk_entry, section_mapping,
};

/// The parts of a pubspec.yaml this crate cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PubspecManifest {
    /// Package name
    pub name: Option<String>,
    /// `environment.flutter` and `environment.sdk`
    pub sdks: SdkConstraints,
}

/// Parser for pubspec.yaml files
pub struct PubspecYamlParser;

impl SdkVersionParser for PubspecYamlParser {
    type Output = PubspecManifest;

    fn parse(&self, content: &str) -> Result<Self::Output, ParseError> {
        let tree = parse_document(content)?;

        let root = find_mapping(tree.root_node()).ok_or_else(|| {
            ParseError::InvalidSyntax("Expected a YAML mapping".to_string())
        })?;

        let name = mapping_value(root, content, "name")
            .map(|node| get_node_text(node, content))
            .filter(|name| !name.is_empty());

        let sdks = match section_mapping(root, content, "environment")? {
            Some(environment) => SdkConstraints {
                flutter: sdk_entry(environment, content, "flutter")?,
                dart: sdk_entry(environment, content, "sdk")?,
            },
            None => SdkConstraints::default(),
        };

        Ok(PubspecManifest { name, sdks })
    }
}
