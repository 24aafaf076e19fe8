//! Flutter SDK release catalog
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ReleaseSource │────▶│ReleaseCatalog│◀────│ReleaseFinder │
//! │   (fetch)    │     │   (index)    │     │   (match)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Parsed release feed, grouped by channel, and release matching
//! - [`finder`]: Fetch-then-match lookup behind the [`finder::SdkReleaseFinder`] trait
//! - [`source`]: Trait for fetching the release feed of a platform
//! - [`sources`]: Concrete release sources (Flutter infra storage)
//! - [`error`]: Error types for fetching and reading the feed
//! - [`types`]: Platform, architecture and release types

pub mod catalog;
pub mod error;
pub mod finder;
pub mod source;
pub mod sources;
pub mod types;

pub use catalog::ReleaseCatalog;
pub use error::CatalogError;
pub use finder::{ReleaseFinder, SdkReleaseFinder};
pub use source::ReleaseSource;
pub use types::{Architecture, ArchiveInfo, Platform, Release};
