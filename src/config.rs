use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::project::HostTarget;
use crate::sdk::sources::flutter_infra::DEFAULT_BASE_URL;
use crate::sdk::types::{Architecture, Platform};

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Base URL the `releases_<platform>.json` documents are served from
    pub releases_base_url: String,
    /// Target platform, the host platform when unset
    pub platform: Option<Platform>,
    /// Target architecture, the host architecture when unset
    pub architecture: Option<Architecture>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            releases_base_url: DEFAULT_BASE_URL.to_string(),
            platform: None,
            architecture: None,
        }
    }
}

impl ResolverConfig {
    /// Load the configuration from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Platform and architecture to resolve the SDK for
    ///
    /// Falls back to the host, then to macOS on arm64 for hosts Flutter
    /// does not ship for.
    pub fn target(&self) -> HostTarget {
        HostTarget {
            platform: self
                .platform
                .or_else(Platform::current)
                .unwrap_or(Platform::MacOS),
            architecture: self
                .architecture
                .or_else(Architecture::current)
                .unwrap_or(Architecture::Arm64),
        }
    }
}

/// Base name of the daily rotated resolver log
pub const LOG_FILE_NAME: &str = "flutter-sdk-resolver.log";

/// Directory holding the resolver's daily log files
///
/// `$XDG_DATA_HOME/flutter-sdk-resolver`, else `~/.local/share/flutter-sdk-resolver`,
/// else `./flutter-sdk-resolver`.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Log file path without the date suffix the daily rotation appends
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("flutter-sdk-resolver")
}
