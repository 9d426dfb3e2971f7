//! Icon catalogs - manifest loading, querying and content caching
//!
//! # Architecture
//!
//! ```text
//! Asset root (filesystem or HTTP)
//!     │
//!     ├── feather/
//!     │   ├── manifest.json   ← Sorted file list
//!     │   ├── arrow-left.svg
//!     │   └── bell.svg
//!     └── tabler/...
//!            │
//!            ▼
//!     CatalogProvider         ← One per icon set, lazy load + content cache
//!            │
//!            ▼
//!     ProviderRegistry        ← Active provider, fan-out initialization
//! ```

mod builtin;
mod cache;
mod item;
mod manifest;
mod pagination;
mod provider;
mod source;

pub use builtin::BuiltinProvider;
pub use cache::{CacheEntry, ContentCache, DEFAULT_CONTENT_TTL};
pub use item::{format_display_name, CachedContent, ItemRecord};
pub use manifest::{CatalogManifest, MANIFEST_FILE};
pub use pagination::{Pagination, PaginationResult};
pub use provider::{CatalogProvider, ProviderDescriptor, ProviderInitReport, PLACEHOLDER_SVG};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{join_path, AssetSource, FsSource};

#[cfg(test)]
pub(crate) use source::MockSource;
