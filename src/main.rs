use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::Parser;

use flutter_sdk_resolver::config::ResolverConfig;
use flutter_sdk_resolver::logging;
use flutter_sdk_resolver::parser::types::{PinnedVersion, SdkConstraints, VersionConstraint};
use flutter_sdk_resolver::project::Project;
use flutter_sdk_resolver::sdk::sources::FlutterInfraSource;
use flutter_sdk_resolver::sdk::{Architecture, Platform, ReleaseFinder};
use flutter_sdk_resolver::version::query::{FlutterAndDartSdkVersions, resolve_query};

#[derive(Parser)]
#[command(name = "flutter-sdk-resolver")]
#[command(
    version,
    about = "Resolve the Flutter SDK release a Flutter project should be built with"
)]
struct Cli {
    /// Root directory of the Flutter project
    #[arg(default_value = ".")]
    project_dir: PathBuf,

    /// Target platform (macos, linux, windows)
    #[arg(long)]
    platform: Option<String>,

    /// Target architecture (x64, arm64)
    #[arg(long)]
    arch: Option<String>,

    /// Base URL of the release feed
    #[arg(long)]
    releases_url: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the selection as JSON
    #[arg(long)]
    json: bool,

    /// Print the versions each source declares instead of resolving
    #[arg(long)]
    sources: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let config = load_config(&cli)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli, config))
}

fn load_config(cli: &Cli) -> anyhow::Result<ResolverConfig> {
    let mut config = match &cli.config {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ResolverConfig::default(),
    };

    if let Some(platform) = &cli.platform {
        config.platform = Some(
            platform
                .parse::<Platform>()
                .map_err(|_| anyhow!("Unsupported platform: {}", platform))?,
        );
    }
    if let Some(arch) = &cli.arch {
        config.architecture = Some(
            arch.parse::<Architecture>()
                .map_err(|_| anyhow!("Unsupported architecture: {}", arch))?,
        );
    }
    if let Some(url) = &cli.releases_url {
        config.releases_base_url = url.clone();
    }

    Ok(config)
}

async fn run(cli: Cli, config: ResolverConfig) -> anyhow::Result<()> {
    let finder = Arc::new(ReleaseFinder::new(FlutterInfraSource::new(
        &config.releases_base_url,
    )));
    let project = Project::open(&cli.project_dir, finder, config.target())?;

    if cli.sources {
        let versions = project.flutter_and_dart_sdk_versions()?;
        print!("{}", format_sources(&versions));
        return Ok(());
    }

    match project.flutter_sdk_version_to_use().await? {
        Some(selection) if cli.json => println!("{}", serde_json::to_string(&selection)?),
        Some(selection) => println!("{} {}", selection.version, selection.channel),
        None => {
            return Err(anyhow!(
                "no compatible SDK found for {}",
                project.name().unwrap_or("project")
            ));
        }
    }

    Ok(())
}

fn format_sources(versions: &FlutterAndDartSdkVersions) -> String {
    let resolved = resolve_query(versions);
    let mut out = String::new();

    out.push_str(&format!("fvm           {}\n", format_pin(versions.fvm.as_ref())));
    out.push_str(&format!("asdf          {}\n", format_pin(versions.asdf.as_ref())));
    out.push_str(&format!("pubspec.lock  {}\n", format_sdks(&versions.pubspec_lock)));
    out.push_str(&format!("pubspec.yaml  {}\n", format_sdks(&versions.pubspec)));
    out.push_str(&format!(
        "=> flutter from {}, dart from {}\n",
        resolved.flutter_source.map_or("-", |s| s.as_str()),
        resolved.dart_source.map_or("-", |s| s.as_str()),
    ));

    out
}

fn format_pin(pin: Option<&PinnedVersion>) -> String {
    match pin {
        Some(PinnedVersion {
            version,
            channel: Some(channel),
        }) => format!("{}@{}", version, channel),
        Some(PinnedVersion { version, .. }) => version.to_string(),
        None => "-".to_string(),
    }
}

fn format_sdks(sdks: &SdkConstraints) -> String {
    let entry = |c: &Option<VersionConstraint>| {
        c.as_ref().map_or("-".to_string(), ToString::to_string)
    };
    format!("flutter={} dart={}", entry(&sdks.flutter), entry(&sdks.dart))
}
