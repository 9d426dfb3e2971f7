//! Catalog item records

use serde::{Deserialize, Serialize};

/// Content attached to an item record
///
/// Keeps "never fetched" apart from "fetched and empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CachedContent {
    #[default]
    NotFetched,
    Fetched(String),
}

impl CachedContent {
    pub fn is_not_fetched(&self) -> bool {
        matches!(self, CachedContent::NotFetched)
    }

    /// The fetched markup, if any
    pub fn as_fetched(&self) -> Option<&str> {
        match self {
            CachedContent::Fetched(content) => Some(content),
            CachedContent::NotFetched => None,
        }
    }
}

/// One item of a provider's catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// Unique within the owning provider
    pub id: String,

    /// File stem, e.g. `arrow-left`
    pub name: String,

    /// Human-readable name, e.g. `Arrow Left`
    pub display_name: String,

    /// Id of the provider this item came from
    pub provider_id: String,

    /// File name relative to the provider's base path
    pub relative_path: String,

    #[serde(default, skip_serializing_if = "CachedContent::is_not_fetched")]
    pub cached_content: CachedContent,
}

impl ItemRecord {
    /// Build a record from a manifest file name
    pub fn from_file_name(provider_id: &str, file_name: &str) -> Self {
        let name = file_name
            .strip_suffix(".svg")
            .unwrap_or(file_name)
            .to_string();

        Self {
            id: format!("{provider_id}_{name}"),
            display_name: format_display_name(&name),
            provider_id: provider_id.to_string(),
            relative_path: file_name.to_string(),
            name,
            cached_content: CachedContent::NotFetched,
        }
    }

    /// File name used when handing the item to a host, e.g. `bell_feather.svg`
    pub fn export_file_name(&self) -> String {
        format!("{}_{}.svg", self.name, self.provider_id.to_lowercase())
    }
}

/// Turn a file stem into a display name: `arrow-left_2` -> `Arrow Left 2`
pub fn format_display_name(name: &str) -> String {
    name.split(['-', '_'])
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
