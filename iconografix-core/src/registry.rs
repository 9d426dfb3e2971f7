//! Provider registry
//!
//! Owns every configured [`CatalogProvider`] and the single "active" pointer
//! that search and random queries are routed to. The registry is a plain
//! value built once at startup and handed to whoever needs it.

use futures::future::join_all;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::catalog::{
    AssetSource, CatalogProvider, ItemRecord, PaginationResult, ProviderInitReport,
};
use crate::config::IconografixConfig;
use crate::error::{CatalogError, Result};

/// Catalog size of one registered provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    pub id: String,
    pub display_name: String,
    pub count: usize,
}

/// Registered providers plus the active pointer
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: Vec<CatalogProvider>,
    active: Option<String>,
    ready: AtomicBool,
}

impl ProviderRegistry {
    /// Create an empty registry with no active provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry for every provider in `config`, all reading from
    /// `source`, with the configured default provider active
    pub fn from_config(config: &IconografixConfig, source: Arc<dyn AssetSource>) -> Result<Self> {
        let mut registry = Self::new();

        for descriptor in &config.providers {
            registry.register(CatalogProvider::new(
                descriptor.clone(),
                Arc::clone(&source),
                config.content_ttl(),
            ))?;
        }

        if !registry.set_active(&config.default_provider) {
            warn!(
                "Default provider '{}' is not registered; no provider is active",
                config.default_provider
            );
        }

        Ok(registry)
    }

    /// Add an uninitialized provider
    ///
    /// Registering an id twice is a configuration error.
    pub fn register(&mut self, provider: CatalogProvider) -> Result<()> {
        if self.get(provider.id()).is_some() {
            return Err(CatalogError::DuplicateProvider {
                id: provider.id().to_string(),
            });
        }

        debug!("Registered provider {}", provider.id());
        self.providers.push(provider);
        self.ready.store(false, Ordering::Release);
        Ok(())
    }

    /// Initialize every provider concurrently
    ///
    /// Resolves once all of them have settled. A provider whose manifest
    /// fails to load comes up empty without affecting the others.
    pub async fn initialize_all(&self) -> Vec<ProviderInitReport> {
        let reports = join_all(self.providers.iter().map(|p| p.initialize())).await;

        let degraded = reports.iter().filter(|r| r.is_degraded()).count();
        for report in reports.iter().filter(|r| r.is_degraded()) {
            warn!(
                "Provider {} initialized empty: {}",
                report.provider,
                report.error.as_deref().unwrap_or("unknown error")
            );
        }

        self.ready.store(true, Ordering::Release);
        info!(
            "All providers initialized ({} total, {} degraded)",
            reports.len(),
            degraded
        );
        reports
    }

    /// Whether `initialize_all` has settled for every registered provider
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Point queries at provider `id`
    ///
    /// Returns false and changes nothing if `id` is not registered.
    pub fn set_active(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            debug!("Cannot activate unknown provider {}", id);
            return false;
        }
        self.active = Some(id.to_string());
        true
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_provider(&self) -> Option<&CatalogProvider> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    /// Get a provider by id
    pub fn get(&self, id: &str) -> Option<&CatalogProvider> {
        self.providers.iter().find(|p| p.id() == id)
    }

    /// All providers in registration order
    pub fn providers(&self) -> &[CatalogProvider] {
        &self.providers
    }

    fn require_active(&self) -> Result<&CatalogProvider> {
        self.active_provider().ok_or(CatalogError::NoActiveProvider)
    }

    /// Search the active provider
    pub async fn search(&self, query: &str, limit: usize, offset: usize) -> Result<PaginationResult> {
        Ok(self.require_active()?.search(query, limit, offset).await)
    }

    /// Random page from the active provider
    pub async fn get_random(&self, limit: usize, offset: usize) -> Result<PaginationResult> {
        Ok(self.require_active()?.get_random(limit, offset).await)
    }

    /// Content for `item`, routed by the item's own provider
    ///
    /// Works regardless of which provider is active. An item from an
    /// unregistered provider yields empty content.
    pub async fn get_svg_content(&self, item: &ItemRecord) -> String {
        match self.get(&item.provider_id) {
            Some(provider) => provider.get_svg_content(item).await,
            None => {
                error!("Provider not found: {}", item.provider_id);
                String::new()
            }
        }
    }

    /// Catalog sizes of every registered provider
    pub fn get_stats(&self) -> Vec<ProviderStats> {
        self.providers
            .iter()
            .map(|p| ProviderStats {
                id: p.id().to_string(),
                display_name: p.display_name().to_string(),
                count: p.len(),
            })
            .collect()
    }
}
