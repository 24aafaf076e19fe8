//! Finds the SDK release a query resolves to

#[cfg(test)]
use mockall::automock;
use tracing::info;

use crate::parser::types::Channel;
use crate::sdk::catalog::ReleaseCatalog;
use crate::sdk::error::CatalogError;
use crate::sdk::source::ReleaseSource;
use crate::sdk::types::{Architecture, Platform, Release};
use crate::version::query::SdkQuery;

/// Trait for finding the newest release that satisfies a query
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SdkReleaseFinder: Send + Sync {
    /// # Returns
    /// * `Ok(Some(Release))` - Newest matching release
    /// * `Ok(None)` - The catalog has no release satisfying the query
    /// * `Err(CatalogError)` - If the catalog could not be fetched
    async fn find_latest_release_for(
        &self,
        platform: Platform,
        architecture: Architecture,
        channel: Option<Channel>,
        query: &SdkQuery,
    ) -> Result<Option<Release>, CatalogError>;
}

/// Fetches a fresh catalog from a [`ReleaseSource`] for every lookup
pub struct ReleaseFinder<S> {
    source: S,
}

impl<S: ReleaseSource> ReleaseFinder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch and parse the release catalog of a platform
    pub async fn fetch_catalog(&self, platform: Platform) -> Result<ReleaseCatalog, CatalogError> {
        let body = self.source.fetch_releases(platform).await?;
        ReleaseCatalog::from_json(platform, &body)
    }
}

#[async_trait::async_trait]
impl<S: ReleaseSource> SdkReleaseFinder for ReleaseFinder<S> {
    async fn find_latest_release_for(
        &self,
        platform: Platform,
        architecture: Architecture,
        channel: Option<Channel>,
        query: &SdkQuery,
    ) -> Result<Option<Release>, CatalogError> {
        let catalog = self.fetch_catalog(platform).await?;
        let release = catalog
            .find_latest_release_for(catalog.platform(), architecture, channel, query)
            .cloned();

        match &release {
            Some(release) => info!(
                "Matched Flutter {} ({}) for {}/{}",
                release.version_name,
                release.channel,
                catalog.platform(),
                architecture
            ),
            None => info!(
                "No Flutter release matches on {}/{}",
                catalog.platform(),
                architecture
            ),
        }

        Ok(release)
    }
}
