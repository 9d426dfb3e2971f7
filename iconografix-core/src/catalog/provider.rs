//! A single icon catalog backed by an asset source
//!
//! The catalog is loaded lazily from the provider's manifest, exactly once.
//! Any failure while loading leaves the provider initialized with an empty
//! catalog: browsing degrades, it never errors.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::cache::ContentCache;
use super::manifest::{CatalogManifest, MANIFEST_FILE};
use super::source::{join_path, AssetSource};
use super::{ItemRecord, PaginationResult};

/// Glyph served in place of content that could not be fetched
pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="#ff9100" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"/><line x1="12" y1="8" x2="12" y2="16"/><line x1="8" y1="12" x2="16" y2="12"/></svg>"##;

/// Static description of a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    /// Registry key, e.g. `FEATHER`
    pub id: String,

    /// e.g. `Feather`
    pub display_name: String,

    /// Directory of the icon set relative to the asset root
    pub base_path: String,
}

impl ProviderDescriptor {
    pub fn new(id: &str, display_name: &str, base_path: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            base_path: base_path.to_string(),
        }
    }
}

/// Outcome of initializing one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInitReport {
    pub provider: String,
    pub count: usize,
    /// Why the catalog came up empty, when it did so because of a failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProviderInitReport {
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug)]
struct LoadedCatalog {
    items: Vec<ItemRecord>,
    error: Option<String>,
}

/// One named icon source
pub struct CatalogProvider {
    descriptor: ProviderDescriptor,
    source: Arc<dyn AssetSource>,
    catalog: OnceCell<LoadedCatalog>,
    cache: ContentCache,
}

impl std::fmt::Debug for CatalogProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogProvider")
            .field("descriptor", &self.descriptor)
            .field("source", &self.source.name())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl CatalogProvider {
    /// Create an uninitialized provider
    pub fn new(
        descriptor: ProviderDescriptor,
        source: Arc<dyn AssetSource>,
        content_ttl: Duration,
    ) -> Self {
        Self {
            descriptor,
            source,
            catalog: OnceCell::new(),
            cache: ContentCache::new(content_ttl),
        }
    }

    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    pub fn display_name(&self) -> &str {
        &self.descriptor.display_name
    }

    pub fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    /// Whether the catalog has been populated (possibly empty)
    pub fn is_initialized(&self) -> bool {
        self.catalog.initialized()
    }

    /// Loaded items in manifest order; empty before initialization
    pub fn items(&self) -> &[ItemRecord] {
        self.catalog
            .get()
            .map(|c| c.items.as_slice())
            .unwrap_or_default()
    }

    /// Catalog size; zero before initialization
    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Load the manifest once
    ///
    /// Concurrent callers share the same in-flight load. Never fails: a
    /// manifest that cannot be fetched or parsed yields an empty catalog.
    pub async fn initialize(&self) -> ProviderInitReport {
        let loaded = self.loaded().await;
        ProviderInitReport {
            provider: self.descriptor.id.clone(),
            count: loaded.items.len(),
            error: loaded.error.clone(),
        }
    }

    async fn loaded(&self) -> &LoadedCatalog {
        self.catalog.get_or_init(|| self.load_catalog()).await
    }

    async fn load_catalog(&self) -> LoadedCatalog {
        let manifest_path = join_path(&self.descriptor.base_path, MANIFEST_FILE);
        debug!(
            "Loading manifest for {} from {} ({})",
            self.descriptor.id,
            manifest_path,
            self.source.name()
        );

        let manifest = self
            .source
            .fetch_text(&manifest_path)
            .await
            .and_then(|content| CatalogManifest::from_json(&content));

        match manifest {
            Ok(manifest) => {
                if let Some(declared) = manifest.provider_id.as_deref() {
                    if declared != self.descriptor.id {
                        debug!(
                            "Manifest for {} declares provider {}",
                            self.descriptor.id, declared
                        );
                    }
                }

                let items: Vec<ItemRecord> = manifest
                    .files
                    .iter()
                    .map(|file| ItemRecord::from_file_name(&self.descriptor.id, file))
                    .collect();

                info!("Loaded {} items for {}", items.len(), self.descriptor.id);
                LoadedCatalog { items, error: None }
            }
            Err(e) => {
                warn!("Failed to load {} manifest: {:#}", self.descriptor.id, e);
                LoadedCatalog {
                    items: Vec::new(),
                    error: Some(format!("{e:#}")),
                }
            }
        }
    }

    /// Case-insensitive substring search over item names
    ///
    /// A blank query returns the whole catalog in manifest order.
    pub async fn search(&self, query: &str, limit: usize, offset: usize) -> PaginationResult {
        let items = &self.loaded().await.items;
        let query = query.trim();

        if query.is_empty() {
            return PaginationResult::paginate(items, limit, offset);
        }

        let needle = query.to_lowercase();
        let matches: Vec<ItemRecord> = items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        PaginationResult::paginate(&matches, limit, offset)
    }

    /// Page through a fresh shuffle of the whole catalog
    ///
    /// Every call reshuffles, so consecutive pages may repeat or skip items.
    pub async fn get_random(&self, limit: usize, offset: usize) -> PaginationResult {
        let shuffled = shuffled(&self.loaded().await.items);
        PaginationResult::paginate(&shuffled, limit, offset)
    }

    /// Markup for `item`, served from cache while younger than the TTL
    ///
    /// A failed fetch yields [`PLACEHOLDER_SVG`], which is cached like any
    /// other content so it is not re-fetched until the TTL runs out.
    pub async fn get_svg_content(&self, item: &ItemRecord) -> String {
        if let Some(content) = self.cache.get_fresh(&item.provider_id, &item.name).await {
            return content;
        }

        let now = Instant::now();
        let path = join_path(&self.descriptor.base_path, &item.relative_path);

        let content = match self.source.fetch_text(&path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to load SVG for {} from {}: {:#}", item.name, path, e);
                PLACEHOLDER_SVG.to_string()
            }
        };

        self.cache
            .insert(&item.provider_id, &item.name, content.clone(), now)
            .await;
        content
    }
}

fn shuffled(items: &[ItemRecord]) -> Vec<ItemRecord> {
    let mut items = items.to_vec();
    items.shuffle(&mut rand::thread_rng());
    items
}
