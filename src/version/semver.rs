use semver::Version;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros.
/// Does NOT strip 'v' prefix (use `parse_release_version` if needed).
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Parse a complete `major.minor.patch[-pre][+build]` version.
///
/// Unlike [`parse_version`], partial versions are rejected: a pinned SDK
/// or a pubspec entry like "3.7" is a range in pub terms, not a version.
pub fn parse_exact_version(version: &str) -> Option<Version> {
    Version::parse(version.trim()).ok()
}

/// Parse a version as published in the Flutter release feed.
///
/// Early releases are tagged with a leading `v` (e.g. "v1.12.13+hotfix.9").
pub fn parse_release_version(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    parse_exact_version(trimmed.strip_prefix('v').unwrap_or(trimmed))
}

/// Parse the Dart SDK version bundled with a Flutter release.
///
/// Dev builds carry a trailing build annotation, e.g.
/// "2.17.0 (build 2.17.0-266.1.beta)"; only the leading token is a version.
pub fn parse_dart_sdk_version(version: &str) -> Option<Version> {
    version
        .split_whitespace()
        .next()
        .and_then(parse_release_version)
}
