//! SDK query resolution
//!
//! Reduces the versions declared by every source to one query against the
//! release catalog. Pinning sources (FVM, asdf) name the exact SDK a developer
//! selected and win over the compatibility ranges of the pubspec files. Each
//! axis takes the first source that declares something; sources are never
//! merged.

use semver::Version;
use tracing::debug;

use crate::parser::types::{Channel, PinnedVersion, SdkConstraints, VersionConstraint};
use crate::version::constraint::Constraint;

/// Versions declared by each source, before precedence is applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlutterAndDartSdkVersions {
    /// `.fvmrc` or `.fvm/fvm_config.json`
    pub fvm: Option<PinnedVersion>,
    /// `.tool-versions`
    pub asdf: Option<PinnedVersion>,
    /// `pubspec.lock` `sdks`
    pub pubspec_lock: SdkConstraints,
    /// `pubspec.yaml` `environment`
    pub pubspec: SdkConstraints,
}

/// Where a resolved requirement came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    Fvm,
    Asdf,
    PubspecLock,
    Pubspec,
}

impl VersionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionSource::Fvm => "fvm",
            VersionSource::Asdf => "asdf",
            VersionSource::PubspecLock => "pubspec.lock",
            VersionSource::Pubspec => "pubspec.yaml",
        }
    }
}

/// The requirement to satisfy against the release catalog
///
/// An unset axis places no constraint on the release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdkQuery {
    pub flutter: Option<VersionConstraint>,
    pub dart: Option<VersionConstraint>,
}

impl SdkQuery {
    pub fn flutter_version(&self) -> Option<&Version> {
        self.flutter.as_ref().and_then(VersionConstraint::version)
    }

    pub fn flutter_constraint(&self) -> Option<&Constraint> {
        self.flutter.as_ref().and_then(VersionConstraint::constraint)
    }

    pub fn dart_version(&self) -> Option<&Version> {
        self.dart.as_ref().and_then(VersionConstraint::version)
    }

    pub fn dart_constraint(&self) -> Option<&Constraint> {
        self.dart.as_ref().and_then(VersionConstraint::constraint)
    }
}

/// Outcome of applying source precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedQuery {
    pub query: SdkQuery,
    /// Only ever set by a pinning source
    pub channel: Option<Channel>,
    pub flutter_source: Option<VersionSource>,
    pub dart_source: Option<VersionSource>,
}

type FlutterExtractor = fn(&FlutterAndDartSdkVersions) -> Option<(VersionConstraint, Option<Channel>)>;
type DartExtractor = fn(&FlutterAndDartSdkVersions) -> Option<VersionConstraint>;

/// Flutter sources, highest precedence first
pub const FLUTTER_PRECEDENCE: [(VersionSource, FlutterExtractor); 4] = [
    (VersionSource::Fvm, |v| pinned(v.fvm.as_ref())),
    (VersionSource::Asdf, |v| pinned(v.asdf.as_ref())),
    (VersionSource::PubspecLock, |v| {
        v.pubspec_lock.flutter.clone().map(|c| (c, None))
    }),
    (VersionSource::Pubspec, |v| v.pubspec.flutter.clone().map(|c| (c, None))),
];

/// Dart sources, highest precedence first
pub const DART_PRECEDENCE: [(VersionSource, DartExtractor); 2] = [
    (VersionSource::PubspecLock, |v| v.pubspec_lock.dart.clone()),
    (VersionSource::Pubspec, |v| v.pubspec.dart.clone()),
];

fn pinned(pin: Option<&PinnedVersion>) -> Option<(VersionConstraint, Option<Channel>)> {
    pin.map(|p| (VersionConstraint::Exact(p.version.clone()), p.channel))
}

/// Apply source precedence to the declared versions
pub fn resolve_query(versions: &FlutterAndDartSdkVersions) -> ResolvedQuery {
    let mut resolved = ResolvedQuery::default();

    if let Some((source, (flutter, channel))) = FLUTTER_PRECEDENCE
        .iter()
        .find_map(|(source, extract)| extract(versions).map(|found| (*source, found)))
    {
        debug!("Flutter requirement {} from {}", flutter, source.as_str());
        resolved.query.flutter = Some(flutter);
        resolved.channel = channel;
        resolved.flutter_source = Some(source);
    }

    if let Some((source, dart)) = DART_PRECEDENCE
        .iter()
        .find_map(|(source, extract)| extract(versions).map(|found| (*source, found)))
    {
        debug!("Dart requirement {} from {}", dart, source.as_str());
        resolved.query.dart = Some(dart);
        resolved.dart_source = Some(source);
    }

    resolved
}
