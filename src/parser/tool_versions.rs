//! asdf `.tool-versions` parser
//!
//! Each line names a tool followed by one or more versions, the first being
//! the preferred one:
//!
//! ```text
//! flutter 3.13.6-stable
//! ruby 3.2.2 system
//! ```

use regex::Regex;

use crate::parser::traits::{ParseError, SdkVersionParser};
use crate::parser::types::{Channel, PinnedVersion};
use crate::version::semver::parse_exact_version;

/// asdf plugin name of the Flutter SDK
const FLUTTER_TOOL: &str = "flutter";

/// Parser for asdf `.tool-versions` files
pub struct ToolVersionsParser {
    /// Regex for a tool line: `tool version [more versions] [# comment]`
    tool_line_re: Regex,
}

impl ToolVersionsParser {
    pub fn new() -> Self {
        Self {
            tool_line_re: Regex::new(r"^(\S+)\s+([^\s#]+)").unwrap(),
        }
    }
}

impl Default for ToolVersionsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SdkVersionParser for ToolVersionsParser {
    type Output = Option<PinnedVersion>;

    fn parse(&self, content: &str) -> Result<Self::Output, ParseError> {
        for line in content.lines() {
            let trimmed = line.trim();

            // Skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some(caps) = self.tool_line_re.captures(trimmed) else {
                continue;
            };

            if &caps[1] != FLUTTER_TOOL {
                continue;
            }

            return parse_tool_version(&caps[2]).map(Some);
        }

        // No flutter line is not a malformed file
        Ok(None)
    }
}

/// Parse `X.Y.Z` or `X.Y.Z-channel`
///
/// The hyphen is also the semver pre-release separator, so the suffix is only
/// taken as a channel when it names one: `2.13.0-0.1.pre` is a version.
fn parse_tool_version(value: &str) -> Result<PinnedVersion, ParseError> {
    if let Some((version_part, suffix)) = value.rsplit_once('-')
        && let Ok(channel) = suffix.parse::<Channel>()
    {
        let version = parse_exact_version(version_part)
            .ok_or_else(|| ParseError::InvalidVersion(version_part.to_string()))?;
        return Ok(PinnedVersion {
            version,
            channel: Some(channel),
        });
    }

    let version =
        parse_exact_version(value).ok_or_else(|| ParseError::InvalidVersion(value.to_string()))?;

    Ok(PinnedVersion {
        version,
        channel: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use semver::Version;

    const TOOL_VERSIONS: &str = "flutter 3.7.12\nruby 3.2.2\n";

    #[rstest]
    #[case(TOOL_VERSIONS, Version::new(3, 7, 12), None)]
    #[case("flutter 3.13.6-stable", Version::new(3, 13, 6), Some(Channel::Stable))]
    #[case("flutter 3.16.0-beta", Version::new(3, 16, 0), Some(Channel::Beta))]
    #[case(
        "flutter 2.13.0-0.1.pre",
        Version::parse("2.13.0-0.1.pre").unwrap(),
        None
    )]
    #[case(
        "flutter 2.13.0-0.1.pre-dev",
        Version::parse("2.13.0-0.1.pre").unwrap(),
        Some(Channel::Dev)
    )]
    #[case("# pinned\nnodejs 20.1.0\n  flutter   3.7.12  system # ci", Version::new(3, 7, 12), None)]
    fn parse_extracts_flutter_version(
        #[case] content: &str,
        #[case] version: Version,
        #[case] channel: Option<Channel>,
    ) {
        let result = ToolVersionsParser::new().parse(content).unwrap();
        assert_eq!(result, Some(PinnedVersion { version, channel }));
    }

    #[rstest]
    #[case("")]
    #[case("ruby 3.2.2\nnodejs 20.1.0")]
    #[case("# flutter 3.7.12")]
    #[case("flutter-tools 1.0.0")]
    fn parse_returns_none_without_flutter_line(#[case] content: &str) {
        let result = ToolVersionsParser::new().parse(content).unwrap();
        assert_eq!(result, None);
    }

    #[rstest]
    #[case("flutter latest", "latest")]
    #[case("flutter 3.7-stable", "3.7")]
    fn parse_fails_on_invalid_version(#[case] content: &str, #[case] expected: &str) {
        let result = ToolVersionsParser::new().parse(content);
        assert!(matches!(result, Err(ParseError::InvalidVersion(v)) if v == expected));
    }

    #[test]
    fn parse_source_returns_none_for_absent_file() {
        let result = ToolVersionsParser::new().parse_source(None).unwrap();
        assert_eq!(result, None);
    }
}
