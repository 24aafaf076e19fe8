//! Flutter SDK release types

use std::fmt;

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::parser::types::Channel;

/// Host operating system a release is built for
///
/// The release feed publishes one document per platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
}

impl Platform {
    /// Returns the key used by the release feed
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::MacOS => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }

    /// Platform of the running host, if Flutter ships for it
    pub fn current() -> Option<Self> {
        if cfg!(target_os = "macos") {
            Some(Platform::MacOS)
        } else if cfg!(target_os = "linux") {
            Some(Platform::Linux)
        } else if cfg!(target_os = "windows") {
            Some(Platform::Windows)
        } else {
            None
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "macos" => Ok(Platform::MacOS),
            "linux" => Ok(Platform::Linux),
            "windows" => Ok(Platform::Windows),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture of the bundled Dart SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X64,
    Arm64,
}

impl Architecture {
    /// Returns the `dart_sdk_arch` value used by the release feed
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X64 => "x64",
            Architecture::Arm64 => "arm64",
        }
    }

    /// Architecture of the running host, if Flutter ships for it
    pub fn current() -> Option<Self> {
        if cfg!(target_arch = "x86_64") {
            Some(Architecture::X64)
        } else if cfg!(target_arch = "aarch64") {
            Some(Architecture::Arm64)
        } else {
            None
        }
    }
}

impl std::str::FromStr for Architecture {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x64" => Ok(Architecture::X64),
            "arm64" => Ok(Architecture::Arm64),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where to download a release from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveInfo {
    pub platform: Platform,
    pub architecture: Architecture,
    /// Path relative to the feed's base URL
    pub path: String,
    pub sha256: String,
}

/// One published Flutter SDK build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Framework commit
    pub hash: String,
    pub channel: Channel,
    pub version: Version,
    /// Version exactly as published (early releases carry a `v` prefix)
    pub version_name: String,
    /// Dart SDK bundled with this release
    pub dart_sdk_version: Option<Version>,
    pub release_date: Option<DateTime<Utc>>,
    pub archive: ArchiveInfo,
}
