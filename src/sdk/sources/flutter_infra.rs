//! Flutter infra release feed implementation

use crate::sdk::error::CatalogError;
use crate::sdk::source::ReleaseSource;
use crate::sdk::types::Platform;
use tracing::{debug, warn};

/// Default base URL of the Flutter release feed
pub const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com/flutter_infra_release/releases";

/// Release source reading `releases_<platform>.json` from Flutter's storage bucket
pub struct FlutterInfraSource {
    client: reqwest::Client,
    base_url: String,
}

impl FlutterInfraSource {
    /// Creates a new FlutterInfraSource with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("flutter-sdk-resolver")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn feed_url(&self, platform: Platform) -> String {
        format!("{}/releases_{}.json", self.base_url, platform)
    }
}

impl Default for FlutterInfraSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl ReleaseSource for FlutterInfraSource {
    async fn fetch_releases(&self, platform: Platform) -> Result<String, CatalogError> {
        let url = self.feed_url(platform);
        debug!("Fetching Flutter releases from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if !status.is_success() {
            warn!("Flutter release feed returned status {}: {}", status, url);
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        response.text().await.map_err(|e| {
            warn!("Failed to read Flutter release feed: {}", e);
            CatalogError::InvalidResponse(e.to_string())
        })
    }
}
