//! Common types for parsers

use std::fmt;

use semver::Version;

use crate::version::constraint::Constraint;
use crate::version::semver::parse_exact_version;

/// Flutter release channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Stable,
    Beta,
    Dev,
    Master,
}

impl Channel {
    /// Returns the string representation of the channel
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Stable => "stable",
            Channel::Beta => "beta",
            Channel::Dev => "dev",
            Channel::Master => "master",
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stable" => Ok(Channel::Stable),
            "beta" => Ok(Channel::Beta),
            "dev" => Ok(Channel::Dev),
            "master" => Ok(Channel::Master),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An SDK requirement: either one exact version or a range of versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    Exact(Version),
    Range(Constraint),
}

impl VersionConstraint {
    /// Parse a pubspec SDK entry
    ///
    /// A complete semantic version is an exact requirement, anything else
    /// must be a valid pub constraint.
    pub fn parse(value: &str) -> Option<Self> {
        match parse_exact_version(value) {
            Some(version) => Some(VersionConstraint::Exact(version)),
            None => Constraint::parse(value).map(VersionConstraint::Range),
        }
    }

    pub fn version(&self) -> Option<&Version> {
        match self {
            VersionConstraint::Exact(version) => Some(version),
            VersionConstraint::Range(_) => None,
        }
    }

    pub fn constraint(&self) -> Option<&Constraint> {
        match self {
            VersionConstraint::Exact(_) => None,
            VersionConstraint::Range(constraint) => Some(constraint),
        }
    }

    /// Check if a concrete version meets this requirement
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            VersionConstraint::Exact(exact) => exact == version,
            VersionConstraint::Range(constraint) => constraint.satisfies(version),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Exact(version) => write!(f, "{}", version),
            VersionConstraint::Range(constraint) => write!(f, "{}", constraint),
        }
    }
}

/// A Flutter SDK pinned by a version manager (FVM, asdf)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedVersion {
    pub version: Version,
    /// Channel suffix, e.g. `beta` in "2.2.2@beta"
    pub channel: Option<Channel>,
}

/// SDK constraints declared by a pubspec file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdkConstraints {
    pub flutter: Option<VersionConstraint>,
    pub dart: Option<VersionConstraint>,
}
