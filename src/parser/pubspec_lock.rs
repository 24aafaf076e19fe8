//! pubspec.lock parser
//!
//! `pub get` records the SDK constraints the resolved dependency graph needs:
//!
//! ```yaml
//! sdks:
//!   dart: ">=2.19.6 <3.0.0"
//!   flutter: ">=3.7.12"
//! ```

use crate::parser::traits::{ParseError, SdkVersionParser};
use crate::parser::types::SdkConstraints;
use crate::parser::yaml::{find_mapping, parse_document, sdk_entry, section_mapping};

/// Parser for pubspec.lock files
pub struct PubspecLockParser;

impl SdkVersionParser for PubspecLockParser {
    type Output = SdkConstraints;

    fn parse(&self, content: &str) -> Result<Self::Output, ParseError> {
        let tree = parse_document(content)?;

        let root = find_mapping(tree.root_node()).ok_or_else(|| {
            ParseError::InvalidSyntax("Expected a YAML mapping".to_string())
        })?;

        let Some(sdks) = section_mapping(root, content, "sdks")? else {
            return Ok(SdkConstraints::default());
        };

        Ok(SdkConstraints {
            flutter: sdk_entry(sdks, content, "flutter")?,
            dart: sdk_entry(sdks, content, "dart")?,
        })
    }
}
