//! Iconografix configuration
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. `ICONOGRAFIX_*` environment variables
//! 2. A JSON config file passed explicitly (e.g. `--config iconografix.json`)
//! 3. Built-in defaults
//!
//! ```json
//! {
//!   "production": false,
//!   "assetsPath": "assets/icons",
//!   "defaultProvider": "GILBARBARA",
//!   "contentCacheTtlSecs": 3600,
//!   "providers": [
//!     { "id": "FEATHER", "displayName": "Feather", "basePath": "feather" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::catalog::{BuiltinProvider, ProviderDescriptor};
use crate::error::{CatalogError, Result};
use crate::host::TargetOrigin;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "ICONOGRAFIX_";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconografixConfig {
    /// Production deployments require an exact host origin
    #[serde(default)]
    pub production: bool,

    /// Root of the asset tree (directory, or base URL with the `http` feature)
    #[serde(default = "default_assets_path")]
    pub assets_path: String,

    /// Provider made active at startup
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Page size used when the caller does not ask for one
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest page size a caller may request
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// How long fetched markup stays fresh
    #[serde(default = "default_content_cache_ttl_secs")]
    pub content_cache_ttl_secs: u64,

    /// Start the selection in multi mode
    #[serde(default = "default_true")]
    pub multi_select: bool,

    /// Origin of the embedding host
    #[serde(default = "default_host_origin")]
    pub host_origin: String,

    /// Plugin name reported in host metadata
    #[serde(default = "default_plugin_name")]
    pub plugin_name: String,

    /// Plugin version reported in host metadata
    #[serde(default = "default_plugin_version")]
    pub plugin_version: String,

    /// Icon sets to register, in order
    #[serde(default = "BuiltinProvider::all_descriptors")]
    pub providers: Vec<ProviderDescriptor>,
}

fn default_assets_path() -> String {
    "assets/icons".to_string()
}

fn default_provider() -> String {
    BuiltinProvider::Gilbarbara.id().to_string()
}

fn default_limit() -> usize {
    24
}

fn default_max_limit() -> usize {
    100
}

fn default_content_cache_ttl_secs() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}

fn default_host_origin() -> String {
    "https://beta.quarklayout.com".to_string()
}

fn default_plugin_name() -> String {
    "Iconografix".to_string()
}

fn default_plugin_version() -> String {
    "1.0.0".to_string()
}

impl Default for IconografixConfig {
    fn default() -> Self {
        Self {
            production: false,
            assets_path: default_assets_path(),
            default_provider: default_provider(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            content_cache_ttl_secs: default_content_cache_ttl_secs(),
            multi_select: default_true(),
            host_origin: default_host_origin(),
            plugin_name: default_plugin_name(),
            plugin_version: default_plugin_version(),
            providers: BuiltinProvider::all_descriptors(),
        }
    }
}

impl IconografixConfig {
    /// Load configuration from an optional file plus process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config file (no environment overrides, no validation)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| CatalogError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `ICONOGRAFIX_*` overrides from `lookup`
    ///
    /// A value that cannot be parsed is an error rather than being ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(value) = var("PRODUCTION") {
            self.production = parse_flag(&value).ok_or_else(|| {
                CatalogError::config(format!(
                    "{ENV_PREFIX}PRODUCTION must be one of 1/0, true/false, yes/no, on/off: {value}"
                ))
            })?;
        }
        if let Some(value) = var("ASSETS_PATH") {
            self.assets_path = value;
        }
        if let Some(value) = var("DEFAULT_PROVIDER") {
            self.default_provider = value;
        }
        if let Some(value) = var("HOST_ORIGIN") {
            self.host_origin = value;
        }
        if let Some(value) = var("CONTENT_CACHE_TTL_SECS") {
            self.content_cache_ttl_secs = value.trim().parse().map_err(|_| {
                CatalogError::config(format!(
                    "{ENV_PREFIX}CONTENT_CACHE_TTL_SECS must be a whole number of seconds: {value}"
                ))
            })?;
        }
        Ok(())
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(CatalogError::config("at least one provider is required"));
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if provider.id.trim().is_empty() {
                return Err(CatalogError::config("provider ids must not be empty"));
            }
            if !seen.insert(provider.id.as_str()) {
                return Err(CatalogError::DuplicateProvider {
                    id: provider.id.clone(),
                });
            }
        }

        if !seen.contains(self.default_provider.as_str()) {
            return Err(CatalogError::UnknownProvider {
                id: self.default_provider.clone(),
            });
        }

        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(CatalogError::config(format!(
                "default_limit must be between 1 and max_limit ({})",
                self.max_limit
            )));
        }

        if self.production {
            self.target_origin()?;
        }

        Ok(())
    }

    pub fn content_ttl(&self) -> Duration {
        Duration::from_secs(self.content_cache_ttl_secs)
    }

    /// Clamp a requested page size into `1..=max_limit`, defaulting when absent
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }

    /// Host origin for this deployment
    ///
    /// Outside production a wildcard (`*`) is allowed; in production only an
    /// exact origin is.
    pub fn target_origin(&self) -> Result<TargetOrigin> {
        let origin = TargetOrigin::parse(&self.host_origin)?;
        if self.production && origin.is_wildcard() {
            return Err(CatalogError::config(
                "a wildcard host origin is not allowed in production",
            ));
        }
        Ok(origin)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
