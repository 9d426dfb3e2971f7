//! Provider manifest parsing (manifest.json)
//!
//! A manifest lists the files of one icon set in sorted order. Two shapes
//! are accepted:
//!
//! ```json
//! { "provider": "FEATHER", "displayName": "Feather", "count": 2,
//!   "lastUpdated": "2025-01-01T00:00:00Z", "files": ["a.svg", "b.svg"] }
//! ```
//!
//! or, degraded, a bare array of file names.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Manifest file name inside each provider's base path
pub const MANIFEST_FILE: &str = "manifest.json";

/// A parsed provider manifest
///
/// Only `files` drives the catalog. The other fields are informational, so a
/// value of the wrong type reads as absent instead of rejecting the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogManifest {
    /// Provider id the manifest was generated for
    #[serde(default, rename = "provider", deserialize_with = "de_lenient")]
    pub provider_id: Option<String>,

    #[serde(default, deserialize_with = "de_lenient")]
    pub display_name: Option<String>,

    /// File count as recorded by the generator
    #[serde(default, deserialize_with = "de_lenient")]
    pub count: Option<usize>,

    /// When the manifest was generated
    #[serde(default, rename = "lastUpdated", deserialize_with = "de_lenient")]
    pub generated_at: Option<DateTime<Utc>>,

    /// Ordered file names
    #[serde(default, deserialize_with = "de_files_lenient")]
    pub files: Vec<String>,
}

impl CatalogManifest {
    /// Parse a manifest from JSON, accepting the bare-list form
    pub fn from_json(content: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(content).context("Invalid manifest JSON")?;

        match document {
            Value::Array(entries) => Ok(CatalogManifest {
                files: file_names(entries),
                ..Default::default()
            }),
            Value::Object(_) => {
                serde_json::from_value(document).context("Invalid manifest JSON")
            }
            other => bail!(
                "Invalid manifest JSON: expected an object or a list of file names, found {}",
                kind(&other)
            ),
        }
    }

    /// Whether this came from the bare-list form
    pub fn is_degraded(&self) -> bool {
        self.provider_id.is_none() && self.display_name.is_none()
    }
}

fn de_lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn de_files_lenient<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(entries) => file_names(entries),
        Value::Null => Vec::new(),
        other => {
            warn!("Manifest 'files' is {}, treating as empty", kind(&other));
            Vec::new()
        }
    })
}

fn file_names(entries: Vec<Value>) -> Vec<String> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(name),
            other => {
                warn!("Skipping manifest entry that is not a file name: {}", other);
                None
            }
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let json = r#"{
            "provider": "FEATHER",
            "displayName": "Feather",
            "count": 3,
            "lastUpdated": "2025-06-01T12:00:00.000Z",
            "files": ["arrow-left.svg", "arrow-right.svg", "bell.svg"]
        }"#;

        let manifest = CatalogManifest::from_json(json).unwrap();
        assert_eq!(manifest.provider_id.as_deref(), Some("FEATHER"));
        assert_eq!(manifest.display_name.as_deref(), Some("Feather"));
        assert_eq!(manifest.count, Some(3));
        assert!(manifest.generated_at.is_some());
        assert_eq!(manifest.files.len(), 3);
        assert!(!manifest.is_degraded());
    }

    #[test]
    fn test_parse_bare_list() {
        let manifest = CatalogManifest::from_json(r#"["a.svg", "b.svg"]"#).unwrap();
        assert_eq!(manifest.files, vec!["a.svg", "b.svg"]);
        assert!(manifest.is_degraded());
    }

    #[test]
    fn test_object_without_files_is_empty() {
        let manifest = CatalogManifest::from_json(r#"{"provider": "TABLER"}"#).unwrap();
        assert!(manifest.files.is_empty());
    }

    #[test]
    fn test_lenient_metadata() {
        let manifest = CatalogManifest::from_json(
            r#"{"provider": "F", "lastUpdated": "June 1 2025", "files": ["a.svg", "b.svg"]}"#,
        )
        .unwrap();
        assert_eq!(manifest.provider_id.as_deref(), Some("F"));
        assert_eq!(manifest.generated_at, None);
        assert_eq!(manifest.files, vec!["a.svg", "b.svg"]);

        let manifest =
            CatalogManifest::from_json(r#"{"count": "2", "files": ["a.svg", "b.svg"]}"#).unwrap();
        assert_eq!(manifest.count, None);
        assert_eq!(manifest.files.len(), 2);

        let manifest = CatalogManifest::from_json(r#"{"provider": "F", "files": null}"#).unwrap();
        assert!(manifest.files.is_empty());
    }

    #[test]
    fn test_non_string_entries_are_skipped() {
        let manifest = CatalogManifest::from_json(r#"["a.svg", 7, null, "b.svg"]"#).unwrap();
        assert_eq!(manifest.files, vec!["a.svg", "b.svg"]);

        let manifest = CatalogManifest::from_json(r#"{"files": "a.svg"}"#).unwrap();
        assert!(manifest.files.is_empty());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(CatalogManifest::from_json("<html>not found</html>").is_err());
        assert!(CatalogManifest::from_json("42").is_err());
    }
}
