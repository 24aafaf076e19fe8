//! Flutter release catalog
//!
//! Indexes one platform's release feed by channel and picks the release a
//! query asks for.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::parser::types::Channel;
use crate::sdk::error::CatalogError;
use crate::sdk::types::{Architecture, ArchiveInfo, Platform, Release};
use crate::version::query::SdkQuery;
use crate::version::semver::{parse_dart_sdk_version, parse_release_version};

/// Release feed document (`releases_<platform>.json`)
#[derive(Debug, Deserialize)]
struct ReleasesResponse {
    #[serde(default)]
    base_url: String,
    #[serde(default)]
    current_release: IndexMap<String, String>,
    releases: Vec<ReleaseRecord>,
}

/// One entry of the `releases` array
#[derive(Debug, Deserialize)]
struct ReleaseRecord {
    hash: String,
    channel: String,
    version: String,
    #[serde(default)]
    dart_sdk_version: Option<String>,
    #[serde(default)]
    dart_sdk_arch: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    archive: String,
    #[serde(default)]
    sha256: String,
}

/// Releases published for one platform, grouped by channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCatalog {
    platform: Platform,
    base_url: String,
    current_release: IndexMap<Channel, String>,
    releases: IndexMap<Channel, Vec<Release>>,
}

impl ReleaseCatalog {
    /// Create a catalog from already parsed releases
    pub fn new(
        platform: Platform,
        base_url: &str,
        current_release: IndexMap<Channel, String>,
        releases: Vec<Release>,
    ) -> Self {
        let mut by_channel: IndexMap<Channel, Vec<Release>> = IndexMap::new();
        for release in releases {
            by_channel.entry(release.channel).or_default().push(release);
        }

        Self {
            platform,
            base_url: base_url.trim_end_matches('/').to_string(),
            current_release,
            releases: by_channel,
        }
    }

    /// Parse a release feed document
    ///
    /// Entries on unknown channels or with unparseable versions are skipped.
    pub fn from_json(platform: Platform, body: &str) -> Result<Self, CatalogError> {
        let response: ReleasesResponse = serde_json::from_str(body).map_err(|e| {
            warn!("Failed to parse Flutter release feed: {}", e);
            CatalogError::InvalidResponse(e.to_string())
        })?;

        let current_release = response
            .current_release
            .into_iter()
            .filter_map(|(channel, hash)| channel.parse::<Channel>().ok().map(|c| (c, hash)))
            .collect();

        let releases = response
            .releases
            .into_iter()
            .filter_map(|record| to_release(platform, record))
            .collect();

        Ok(Self::new(
            platform,
            &response.base_url,
            current_release,
            releases,
        ))
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// All releases on a channel, in feed order
    pub fn releases_on(&self, channel: Channel) -> &[Release] {
        self.releases
            .get(&channel)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The release a channel currently points to
    pub fn current_release(&self, channel: Channel, architecture: Architecture) -> Option<&Release> {
        let hash = self.current_release.get(&channel)?;
        self.releases_on(channel)
            .iter()
            .find(|r| &r.hash == hash && r.archive.architecture == architecture)
    }

    /// Download URL of a release archive
    pub fn archive_url(&self, release: &Release) -> String {
        format!("{}/{}", self.base_url, release.archive.path)
    }

    /// Find the newest release satisfying the query
    ///
    /// An unspecified channel means stable. Only the Flutter side of the query
    /// filters releases: the bundled Dart SDK is fixed by the Flutter release.
    /// Returns None if no release matches.
    pub fn find_latest_release_for(
        &self,
        platform: Platform,
        architecture: Architecture,
        channel: Option<Channel>,
        query: &SdkQuery,
    ) -> Option<&Release> {
        let channel = channel.unwrap_or(Channel::Stable);

        self.releases_on(channel)
            .iter()
            .filter(|r| r.archive.platform == platform && r.archive.architecture == architecture)
            .filter(|r| {
                query
                    .flutter
                    .as_ref()
                    .is_none_or(|flutter| flutter.matches(&r.version))
            })
            .max_by(|a, b| a.version.cmp_precedence(&b.version))
    }
}

fn to_release(platform: Platform, record: ReleaseRecord) -> Option<Release> {
    let Ok(channel) = record.channel.parse::<Channel>() else {
        debug!(
            "Skipping release {} on unknown channel {}",
            record.version, record.channel
        );
        return None;
    };

    let Some(version) = parse_release_version(&record.version) else {
        debug!("Skipping release with invalid version {}", record.version);
        return None;
    };

    // Entries published before arm64 builds existed have no architecture
    let architecture = match record.dart_sdk_arch.as_deref() {
        None => Architecture::X64,
        Some(arch) => match arch.parse::<Architecture>() {
            Ok(architecture) => architecture,
            Err(()) => {
                debug!("Skipping release {} for architecture {}", record.version, arch);
                return None;
            }
        },
    };

    let release_date = record
        .release_date
        .as_deref()
        .and_then(|date| DateTime::parse_from_rfc3339(date).ok())
        .map(|date| date.with_timezone(&Utc));

    Some(Release {
        hash: record.hash,
        channel,
        version,
        version_name: record.version,
        dart_sdk_version: record
            .dart_sdk_version
            .as_deref()
            .and_then(parse_dart_sdk_version),
        release_date,
        archive: ArchiveInfo {
            platform,
            architecture,
            path: record.archive,
            sha256: record.sha256,
        },
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::parser::types::VersionConstraint;
    use rstest::rstest;
    use semver::Version;

    pub(crate) const FLUTTER_SDKS_RESPONSE: &str = r#"{
	"base_url": "https://storage.googleapis.com/flutter_infra_release/releases",
	"current_release": {
		"beta": "476aa717cd342d11e16439b71f4f4c9209c50712",
		"dev": "13a2fb10b838971ce211230f8ffdd094c14af02c",
		"stable": "d211f42860350d914a5ad8102f9ec32764dc6d06"
	},
	"releases": [
		{
			"hash": "d211f42860350d914a5ad8102f9ec32764dc6d06",
			"channel": "stable",
			"version": "3.13.9",
			"dart_sdk_version": "3.1.5",
			"dart_sdk_arch": "x64",
			"release_date": "2023-10-25T21:53:10.833612Z",
			"archive": "stable/macos/flutter_macos_3.13.9-stable.zip",
			"sha256": "c14436a8b968d56616d8c99f646470160840f1047fd11e8124493c1c2706c4bf"
		},
		{
			"hash": "d211f42860350d914a5ad8102f9ec32764dc6d06",
			"channel": "stable",
			"version": "3.13.9",
			"dart_sdk_version": "3.1.5",
			"dart_sdk_arch": "arm64",
			"release_date": "2023-10-25T21:49:54.203764Z",
			"archive": "stable/macos/flutter_macos_arm64_3.13.9-stable.zip",
			"sha256": "374615f834f23cff70eaef3ef1c3ebd3f8246ebf4c7b7f100115c98bb32858bb"
		},
		{
			"hash": "d211f42860350d914a5ad8102f9ec32764dc6d06",
			"channel": "beta",
			"version": "3.13.9",
			"dart_sdk_version": "3.1.5",
			"dart_sdk_arch": "arm64",
			"release_date": "2023-10-25T21:49:54.203764Z",
			"archive": "stable/macos/flutter_macos_arm64_3.13.9-stable.zip",
			"sha256": "374615f834f23cff70eaef3ef1c3ebd3f8246ebf4c7b7f100115c98bb32858bb"
		},
		{
			"hash": "7f20e5d18ce4cb80c621533090a7c5113f5bdc52",
			"channel": "stable",
			"version": "3.7.12",
			"dart_sdk_version": "2.19.6",
			"dart_sdk_arch": "arm64",
			"release_date": "2023-04-17T22:32:05.446049Z",
			"archive": "stable/macos/flutter_macos_arm64_3.7.12-stable.zip",
			"sha256": "1d52fbeb6a3f5ed3a0b8a3cd0e2d9d6e8b0d04bc6a9d4e16d4b1b5f4e0b5a0f2"
		},
		{
			"hash": "13a2fb10b838971ce211230f8ffdd094c14af02c",
			"channel": "dev",
			"version": "2.13.0-0.1.pre",
			"dart_sdk_version": "2.17.0 (build 2.17.0-266.1.beta)",
			"dart_sdk_arch": "arm64",
			"release_date": "2022-04-13T18:48:12.766415Z",
			"archive": "dev/macos/flutter_macos_arm64_2.13.0-0.1.pre-dev.zip",
			"sha256": "17eb685657cee569f8fd3aa2ccd80ec38577918df8bdb9a2552c97662c166f52"
		},
		{
			"hash": "68bfaea224880b488c617afe30ab12091ea8fa4e",
			"channel": "stable",
			"version": "v1.12.13+hotfix.9",
			"release_date": "2020-04-01T18:51:17.929225Z",
			"archive": "stable/macos/flutter_macos_v1.12.13+hotfix.9-stable.zip",
			"sha256": "a4e0a7e7e6c6e3f3a2b8ac56e20b1f5a4d0e6b8d2c2d5e4f1b9a3c7d8e6f5a4b"
		},
		{
			"hash": "0000000000000000000000000000000000000000",
			"channel": "nightly",
			"version": "9.9.9",
			"dart_sdk_arch": "arm64",
			"archive": "nightly/macos/flutter.zip",
			"sha256": ""
		}
	]
}"#;

    fn catalog() -> ReleaseCatalog {
        ReleaseCatalog::from_json(Platform::MacOS, FLUTTER_SDKS_RESPONSE).unwrap()
    }

    fn release(version: &str, channel: Channel, architecture: Architecture) -> Release {
        Release {
            hash: format!("hash-{}", version),
            channel,
            version: Version::parse(version).unwrap(),
            version_name: version.to_string(),
            dart_sdk_version: None,
            release_date: None,
            archive: ArchiveInfo {
                platform: Platform::MacOS,
                architecture,
                path: format!("{}/macos/flutter_macos_{}.zip", channel, version),
                sha256: String::new(),
            },
        }
    }

    fn query(flutter: Option<&str>) -> SdkQuery {
        SdkQuery {
            flutter: flutter.map(|spec| VersionConstraint::parse(spec).unwrap()),
            dart: None,
        }
    }

    #[rstest]
    #[case(None, None, Some(("3.13.9", Channel::Stable)))]
    #[case(Some(Channel::Dev), None, Some(("2.13.0-0.1.pre", Channel::Dev)))]
    #[case(Some(Channel::Beta), None, Some(("3.13.9", Channel::Beta)))]
    #[case(None, Some("3.7.12"), Some(("3.7.12", Channel::Stable)))]
    #[case(None, Some("^3.7.0"), Some(("3.13.9", Channel::Stable)))]
    #[case(None, Some(">=3.7.0 <3.10.0"), Some(("3.7.12", Channel::Stable)))]
    #[case(None, Some("3.13.10"), None)]
    #[case(Some(Channel::Master), None, None)]
    fn find_latest_release_for_returns_expected(
        #[case] channel: Option<Channel>,
        #[case] flutter: Option<&str>,
        #[case] expected: Option<(&str, Channel)>,
    ) {
        let catalog = catalog();
        let found = catalog.find_latest_release_for(
            Platform::MacOS,
            Architecture::Arm64,
            channel,
            &query(flutter),
        );
        assert_eq!(
            found.map(|r| (r.version_name.as_str(), r.channel)),
            expected
        );
    }

    #[test]
    fn find_latest_release_for_filters_architecture() {
        let catalog = catalog();
        let found = catalog
            .find_latest_release_for(Platform::MacOS, Architecture::X64, None, &query(None))
            .unwrap();
        assert_eq!(found.version_name, "3.13.9");
        assert_eq!(found.archive.architecture, Architecture::X64);
        assert_eq!(
            found.archive.path,
            "stable/macos/flutter_macos_3.13.9-stable.zip"
        );
    }

    #[test]
    fn find_latest_release_for_filters_platform() {
        let catalog = catalog();
        let found =
            catalog.find_latest_release_for(Platform::Linux, Architecture::Arm64, None, &query(None));
        assert_eq!(found, None);
    }

    #[test]
    fn find_latest_release_for_picks_greatest_satisfying_version() {
        let catalog = ReleaseCatalog::new(
            Platform::MacOS,
            "https://example.com",
            IndexMap::new(),
            vec![
                release("3.1.0", Channel::Stable, Architecture::Arm64),
                release("3.2.5", Channel::Stable, Architecture::Arm64),
                release("4.0.0", Channel::Stable, Architecture::Arm64),
                release("2.10.5", Channel::Stable, Architecture::Arm64),
                release("3.3.0", Channel::Beta, Architecture::Arm64),
            ],
        );

        let found = catalog
            .find_latest_release_for(
                Platform::MacOS,
                Architecture::Arm64,
                Some(Channel::Stable),
                &query(Some(">=3.0.0 <4.0.0")),
            )
            .unwrap();

        assert_eq!(found.version, Version::new(3, 2, 5));
    }

    #[test]
    fn find_latest_release_for_orders_prereleases_below_release() {
        let catalog = ReleaseCatalog::new(
            Platform::MacOS,
            "https://example.com",
            IndexMap::new(),
            vec![
                release("3.16.0", Channel::Beta, Architecture::Arm64),
                release("3.16.0-0.5.pre", Channel::Beta, Architecture::Arm64),
                release("3.15.0-15.2.pre", Channel::Beta, Architecture::Arm64),
            ],
        );

        let found = catalog
            .find_latest_release_for(
                Platform::MacOS,
                Architecture::Arm64,
                Some(Channel::Beta),
                &SdkQuery::default(),
            )
            .unwrap();

        assert_eq!(found.version_name, "3.16.0");
    }

    #[test]
    fn find_latest_release_for_is_idempotent() {
        let catalog = catalog();
        let query = query(Some("^3.7.0"));
        let first = catalog
            .find_latest_release_for(Platform::MacOS, Architecture::Arm64, None, &query)
            .cloned();
        let second = catalog
            .find_latest_release_for(Platform::MacOS, Architecture::Arm64, None, &query)
            .cloned();
        assert_eq!(first, second);
    }

    #[test]
    fn find_latest_release_for_ignores_dart_constraint() {
        let catalog = catalog();
        let query = SdkQuery {
            flutter: None,
            dart: Some(VersionConstraint::parse(">=2.19.6 <3.0.0").unwrap()),
        };
        let found = catalog
            .find_latest_release_for(Platform::MacOS, Architecture::Arm64, None, &query)
            .unwrap();
        // 3.13.9 bundles Dart 3.1.5, outside the Dart range
        assert_eq!(found.version_name, "3.13.9");
    }

    #[test]
    fn from_json_parses_release_fields() {
        let catalog = catalog();
        let dev = &catalog.releases_on(Channel::Dev)[0];
        assert_eq!(dev.hash, "13a2fb10b838971ce211230f8ffdd094c14af02c");
        assert_eq!(dev.version, Version::parse("2.13.0-0.1.pre").unwrap());
        assert_eq!(dev.dart_sdk_version, Some(Version::new(2, 17, 0)));
        assert_eq!(
            dev.release_date.map(|d| d.to_rfc3339()),
            Some("2022-04-13T18:48:12.766415+00:00".to_string())
        );
        assert_eq!(dev.archive.platform, Platform::MacOS);
        assert_eq!(dev.archive.architecture, Architecture::Arm64);
    }

    #[test]
    fn from_json_accepts_v_prefix_and_defaults_architecture() {
        let catalog = catalog();
        let legacy = catalog
            .releases_on(Channel::Stable)
            .iter()
            .find(|r| r.version_name == "v1.12.13+hotfix.9")
            .unwrap();
        assert_eq!(legacy.version, Version::parse("1.12.13+hotfix.9").unwrap());
        assert_eq!(legacy.archive.architecture, Architecture::X64);
        assert_eq!(legacy.dart_sdk_version, None);
    }

    #[test]
    fn from_json_skips_unknown_channels() {
        let catalog = catalog();
        let total: usize = [Channel::Stable, Channel::Beta, Channel::Dev, Channel::Master]
            .into_iter()
            .map(|c| catalog.releases_on(c).len())
            .sum();
        assert_eq!(total, 6);
    }

    #[rstest]
    #[case("")]
    #[case("not json")]
    #[case(r#"{"current_release": {}}"#)]
    fn from_json_fails_on_malformed_feed(#[case] body: &str) {
        let result = ReleaseCatalog::from_json(Platform::MacOS, body);
        assert!(matches!(result, Err(CatalogError::InvalidResponse(_))));
    }

    #[test]
    fn current_release_returns_release_for_channel_hash() {
        let catalog = catalog();
        let current = catalog
            .current_release(Channel::Stable, Architecture::Arm64)
            .unwrap();
        assert_eq!(current.version_name, "3.13.9");
        assert_eq!(
            current.archive.path,
            "stable/macos/flutter_macos_arm64_3.13.9-stable.zip"
        );
        // The beta hash does not appear in the releases list
        assert_eq!(catalog.current_release(Channel::Beta, Architecture::Arm64), None);
    }

    #[test]
    fn archive_url_joins_base_url_and_path() {
        let catalog = catalog();
        let current = catalog
            .current_release(Channel::Stable, Architecture::Arm64)
            .unwrap();
        assert_eq!(
            catalog.archive_url(current),
            "https://storage.googleapis.com/flutter_infra_release/releases/stable/macos/flutter_macos_arm64_3.13.9-stable.zip"
        );
    }
}
