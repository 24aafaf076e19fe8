//! Shared test utilities for end-to-end resolution tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use mockito::{Mock, ServerGuard};
use tempfile::TempDir;

use flutter_sdk_resolver::project::{HostTarget, Project};
use flutter_sdk_resolver::sdk::sources::FlutterInfraSource;
use flutter_sdk_resolver::sdk::{Architecture, Platform, ReleaseFinder};

pub const PUBSPEC_YAML: &str = r#"name: sample_app
description: A new Flutter project.
publish_to: 'none'
version: 1.0.0+1

environment:
  sdk: ">=2.19.6 <3.0.0"
  flutter: "^3.7.12"

dependencies:
  flutter:
    sdk: flutter
  cupertino_icons: ^1.0.2
"#;

pub const PUBSPEC_LOCK: &str = r#"# Generated by pub
# See https://dart.dev/tools/pub/glossary#lockfile
packages:
  cupertino_icons:
    dependency: "direct main"
    description:
      name: cupertino_icons
      sha256: e35129dc44c9118cee2a5603506d823bab99c68393879edb440e0090d07586be
      url: "https://pub.dev"
    source: hosted
    version: "1.0.5"
sdks:
  dart: ">=2.19.6 <3.0.0"
"#;

/// Linux release feed with stable 3.13.9, 3.10.6, 3.7.12 and beta 3.16.0-0.2.pre
pub const LINUX_RELEASES: &str = r#"{
  "base_url": "https://storage.googleapis.com/flutter_infra_release/releases",
  "current_release": {
    "beta": "476aa717cd342d11e16439b71f4f4c9209c50712",
    "stable": "d211f42860350d914a5ad8102f9ec32764dc6d06"
  },
  "releases": [
    {
      "hash": "476aa717cd342d11e16439b71f4f4c9209c50712",
      "channel": "beta",
      "version": "3.16.0-0.2.pre",
      "dart_sdk_version": "3.2.0 (build 3.2.0-210.2.beta)",
      "dart_sdk_arch": "x64",
      "release_date": "2023-10-04T18:12:07.146127Z",
      "archive": "beta/linux/flutter_linux_3.16.0-0.2.pre-beta.tar.xz",
      "sha256": "e2a1d6cf8ec9b2ff7f4ff3bed7c3b4b3f8c86fa1b6be5d4e9bc1c2ba0ae8c5f1"
    },
    {
      "hash": "d211f42860350d914a5ad8102f9ec32764dc6d06",
      "channel": "stable",
      "version": "3.13.9",
      "dart_sdk_version": "3.1.5",
      "dart_sdk_arch": "x64",
      "release_date": "2023-10-25T21:53:10.833612Z",
      "archive": "stable/linux/flutter_linux_3.13.9-stable.tar.xz",
      "sha256": "52ae2a2d4d3bf5a3ea9d1f1d4b1b5e2bc9f0e9c7a2d8d3d6a7c4e1b0f9a8e7d6"
    },
    {
      "hash": "f468f3366c26a5092eb964a230ce7892fda8f2f8",
      "channel": "stable",
      "version": "3.10.6",
      "dart_sdk_version": "3.0.6",
      "dart_sdk_arch": "x64",
      "release_date": "2023-07-13T01:24:40.486290Z",
      "archive": "stable/linux/flutter_linux_3.10.6-stable.tar.xz",
      "sha256": "b06c2d2cdad2ff8ba1b2c4f8bd6eb4f1c4b5e3a6f0f2c9d7e8a1b3c5d7e9f0a1"
    },
    {
      "hash": "4d9e56e694b656610ab87fcf2efbcd226e0ed8cf",
      "channel": "stable",
      "version": "3.7.12",
      "dart_sdk_version": "2.19.6",
      "dart_sdk_arch": "x64",
      "release_date": "2023-04-17T22:32:05.446049Z",
      "archive": "stable/linux/flutter_linux_3.7.12-stable.tar.xz",
      "sha256": "9d9d6bd1b2b5c1e2a3f4d5c6b7a8e9f0d1c2b3a4e5f6d7c8b9a0e1f2d3c4b5a6"
    }
  ]
}"#;

pub const LINUX_X64: HostTarget = HostTarget {
    platform: Platform::Linux,
    architecture: Architecture::X64,
};

/// Create a project directory containing `files` (relative path, content)
pub fn create_project(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (rel_path, content) in files {
        write_file(temp_dir.path(), rel_path, content);
    }
    temp_dir
}

pub fn write_file(root: &Path, rel_path: &str, content: &str) {
    let path = root.join(rel_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Serve `body` as the Linux release feed
pub async fn serve_linux_feed(server: &mut ServerGuard, body: &str) -> Mock {
    server
        .mock("GET", "/releases_linux.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Open a project resolved against the release feed at `releases_url`
pub fn open_project(root: &Path, releases_url: &str) -> Project {
    let finder = Arc::new(ReleaseFinder::new(FlutterInfraSource::new(releases_url)));
    Project::open(root, finder, LINUX_X64).unwrap()
}
