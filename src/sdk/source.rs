//! Release source trait for fetching the Flutter release feed

#[cfg(test)]
use mockall::automock;

use crate::sdk::error::CatalogError;
use crate::sdk::types::Platform;

/// Trait for fetching the release feed of a platform
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches the raw release feed document for a platform
    ///
    /// # Returns
    /// * `Ok(String)` - The feed body, parsed by [`crate::sdk::ReleaseCatalog::from_json`]
    /// * `Err(CatalogError)` - If the feed could not be downloaded
    async fn fetch_releases(&self, platform: Platform) -> Result<String, CatalogError>;
}
