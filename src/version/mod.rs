//! Version handling for SDK requirements
//!
//! # Modules
//!
//! - [`constraint`]: pub version constraint parsing and satisfaction
//! - [`query`]: Source precedence reducing declared versions to one [`query::SdkQuery`]
//! - [`semver`]: Shared semver utilities

pub mod constraint;
pub mod query;
pub mod semver;

pub use constraint::Constraint;
pub use query::{FlutterAndDartSdkVersions, ResolvedQuery, SdkQuery, VersionSource, resolve_query};
