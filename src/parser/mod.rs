//! Parser layer
//! - traits.rs: SdkVersionParser trait definition
//! - types.rs: Common types (Channel, VersionConstraint, PinnedVersion)
//! - fvm_config.rs: FVM `.fvmrc` / `.fvm/fvm_config.json` parser
//! - tool_versions.rs: asdf `.tool-versions` parser
//! - pubspec_lock.rs: pubspec.lock parser
//! - pubspec_yaml.rs: pubspec.yaml parser

pub mod fvm_config;
pub mod pubspec_lock;
pub mod pubspec_yaml;
pub mod tool_versions;
pub mod traits;
pub mod types;
mod yaml;

pub use fvm_config::FvmConfigParser;
pub use pubspec_lock::PubspecLockParser;
pub use pubspec_yaml::{PubspecManifest, PubspecYamlParser};
pub use tool_versions::ToolVersionsParser;
pub use traits::{ParseError, SdkVersionParser};
pub use types::{Channel, PinnedVersion, SdkConstraints, VersionConstraint};
