//! Flutter project façade
//!
//! Reads every version source of a project, applies source precedence and
//! looks the result up in the release catalog.

pub mod file_reader;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::parser::traits::{ParseError, SdkVersionParser};
use crate::parser::types::Channel;
use crate::parser::{
    FvmConfigParser, PubspecLockParser, PubspecManifest, PubspecYamlParser, ToolVersionsParser,
};
use crate::sdk::error::CatalogError;
use crate::sdk::finder::SdkReleaseFinder;
use crate::sdk::types::{Architecture, Platform};
use crate::version::query::{FlutterAndDartSdkVersions, resolve_query};

pub use file_reader::{FileReader, FsFileReader};

/// FVM config files, most recent FVM layout first
pub const FVM_CONFIG_PATHS: [&str; 2] = [".fvmrc", ".fvm/fvm_config.json"];
pub const TOOL_VERSIONS_PATH: &str = ".tool-versions";
pub const PUBSPEC_LOCK_PATH: &str = "pubspec.lock";
pub const PUBSPEC_PATH: &str = "pubspec.yaml";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("No pubspec.yaml found in {path}")]
    MissingPubspec { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: ParseError },

    #[error("Flutter release catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),
}

/// Platform and architecture the SDK is provisioned for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostTarget {
    pub platform: Platform,
    pub architecture: Architecture,
}

/// The SDK release a project should be built with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkSelection {
    pub version: String,
    pub channel: Channel,
}

/// A Flutter project rooted at a directory
pub struct Project {
    root_dir: PathBuf,
    pubspec: PubspecManifest,
    file_reader: Arc<dyn FileReader>,
    release_finder: Arc<dyn SdkReleaseFinder>,
    target: HostTarget,
}

impl Project {
    /// Create a project, reading its pubspec.yaml through `file_reader`
    pub fn new(
        root_dir: impl Into<PathBuf>,
        file_reader: Arc<dyn FileReader>,
        release_finder: Arc<dyn SdkReleaseFinder>,
        target: HostTarget,
    ) -> Result<Self, ProjectError> {
        let root_dir = root_dir.into();

        let content = file_reader
            .read_if_exists(PUBSPEC_PATH)
            .map_err(|source| ProjectError::Io {
                path: root_dir.join(PUBSPEC_PATH),
                source,
            })?
            .ok_or_else(|| ProjectError::MissingPubspec {
                path: root_dir.clone(),
            })?;

        let pubspec = PubspecYamlParser
            .parse(&content)
            .map_err(|source| ProjectError::Parse {
                path: root_dir.join(PUBSPEC_PATH),
                source,
            })?;

        Ok(Self {
            root_dir,
            pubspec,
            file_reader,
            release_finder,
            target,
        })
    }

    /// Create a project reading files from `root_dir` on disk
    pub fn open(
        root_dir: impl Into<PathBuf>,
        release_finder: Arc<dyn SdkReleaseFinder>,
        target: HostTarget,
    ) -> Result<Self, ProjectError> {
        let root_dir = root_dir.into();
        let file_reader = Arc::new(FsFileReader::new(root_dir.clone()));
        Self::new(root_dir, file_reader, release_finder, target)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Package name from pubspec.yaml
    pub fn name(&self) -> Option<&str> {
        self.pubspec.name.as_deref()
    }

    /// Read the SDK versions every source declares
    ///
    /// Files are read again on every call.
    pub fn flutter_and_dart_sdk_versions(&self) -> Result<FlutterAndDartSdkVersions, ProjectError> {
        Ok(FlutterAndDartSdkVersions {
            fvm: self.read_fvm_config()?,
            asdf: self.parse_file(&ToolVersionsParser::new(), TOOL_VERSIONS_PATH)?,
            pubspec_lock: self.parse_file(&PubspecLockParser, PUBSPEC_LOCK_PATH)?,
            pubspec: self.parse_file(&PubspecYamlParser, PUBSPEC_PATH)?.sdks,
        })
    }

    /// Resolve the Flutter SDK release to build the project with
    ///
    /// Returns None if no published release satisfies the project's requirements.
    pub async fn flutter_sdk_version_to_use(&self) -> Result<Option<SdkSelection>, ProjectError> {
        let versions = self.flutter_and_dart_sdk_versions()?;
        let resolved = resolve_query(&versions);

        let release = self
            .release_finder
            .find_latest_release_for(
                self.target.platform,
                self.target.architecture,
                resolved.channel,
                &resolved.query,
            )
            .await?;

        let Some(release) = release else {
            info!("No Flutter SDK release satisfies {}", self.root_dir.display());
            return Ok(None);
        };

        Ok(Some(SdkSelection {
            version: release.version_name,
            channel: release.channel,
        }))
    }

    fn read_fvm_config(&self) -> Result<Option<crate::parser::PinnedVersion>, ProjectError> {
        for rel_path in FVM_CONFIG_PATHS {
            if let Some(content) = self.read_file(rel_path)? {
                return FvmConfigParser::new()
                    .parse(&content)
                    .map_err(|source| self.parse_error(rel_path, source));
            }
        }
        Ok(None)
    }

    fn parse_file<P: SdkVersionParser>(
        &self,
        parser: &P,
        rel_path: &str,
    ) -> Result<P::Output, ProjectError> {
        let content = self.read_file(rel_path)?;
        parser
            .parse_source(content.as_deref())
            .map_err(|source| self.parse_error(rel_path, source))
    }

    fn read_file(&self, rel_path: &str) -> Result<Option<String>, ProjectError> {
        self.file_reader
            .read_if_exists(rel_path)
            .map_err(|source| ProjectError::Io {
                path: self.root_dir.join(rel_path),
                source,
            })
    }

    fn parse_error(&self, rel_path: &str, source: ParseError) -> ProjectError {
        let path = self.root_dir.join(rel_path);
        warn!("Failed to parse {}: {}", path.display(), source);
        ProjectError::Parse { path, source }
    }
}
