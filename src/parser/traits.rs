//! Parser trait definition

/// Trait for parsing SDK version declarations out of a project file
pub trait SdkVersionParser {
    /// What the file declares; `Default` is "nothing declared"
    type Output: Default;

    /// Parse the content of a file that exists
    fn parse(&self, content: &str) -> Result<Self::Output, ParseError>;

    /// Parse a file that may be absent
    ///
    /// An absent file declares nothing and is not an error.
    fn parse_source(&self, content: Option<&str>) -> Result<Self::Output, ParseError> {
        match content {
            Some(content) => self.parse(content),
            None => Ok(Self::Output::default()),
        }
    }
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The file exists but has no content
    #[error("File is empty")]
    EmptyDocument,

    /// Invalid syntax in the file
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    /// A version that must be exact is not a semantic version
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// A version entry is neither a version nor a pub constraint
    #[error("Invalid version constraint: {0}")]
    InvalidConstraint(String),

    /// Unknown release channel
    #[error("Invalid channel: {0}")]
    InvalidChannel(String),

    /// Tree-sitter related error
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}
