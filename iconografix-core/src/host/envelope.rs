//! Host message envelope and content encoding
//!
//! The envelope shape is the stability contract with the embedding host:
//!
//! ```json
//! { "type": "ADD_OBJECT",
//!   "payload": { "dataString": "data:image/svg+xml;base64,...",
//!                "type": "stickerbox",
//!                "metaData": { "name": "Bell", "provider": "FEATHER", ... } } }
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::catalog::ItemRecord;

/// Prefix of every encoded data string
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Messages sent to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum HostMessage {
    #[serde(rename = "ADD_OBJECT")]
    AddObject(AddObjectPayload),
}

impl HostMessage {
    pub fn add_object(data_string: String, meta_data: AddObjectMetadata) -> Self {
        HostMessage::AddObject(AddObjectPayload {
            data_string,
            kind: ObjectKind::Stickerbox,
            meta_data,
        })
    }
}

/// Kind of object the host should create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Stickerbox,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddObjectPayload {
    /// Base64 data URI of the markup
    pub data_string: String,

    #[serde(rename = "type")]
    pub kind: ObjectKind,

    pub meta_data: AddObjectMetadata,
}

/// Metadata describing the object being added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddObjectMetadata {
    pub name: String,
    pub provider: String,
    pub file_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Number of items the user had selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_total: Option<usize>,

    /// 1-based position of the transmitted item within the batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AddObjectMetadata {
    pub fn new(name: &str, provider: &str, file_name: &str) -> Self {
        Self {
            name: name.to_string(),
            provider: provider.to_string(),
            file_name: file_name.to_string(),
            plugin: None,
            version: None,
            timestamp: None,
            batch_total: None,
            batch_index: None,
            message: None,
        }
    }

    /// Metadata for a catalog item
    pub fn for_item(item: &ItemRecord) -> Self {
        Self::new(&item.display_name, &item.provider_id, &item.export_file_name())
    }

    pub fn with_plugin(mut self, plugin: &str, version: &str) -> Self {
        self.plugin = Some(plugin.to_string());
        self.version = Some(version.to_string());
        self
    }

    pub fn with_timestamp(mut self, timestamp: String) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Mark this as the first of `total` selected items
    pub fn with_batch(mut self, total: usize) -> Self {
        self.batch_total = Some(total);
        self.batch_index = Some(1);
        self.message = Some(format!("Selected {total} icons - adding first one"));
        self
    }
}

/// Collapse whitespace (line breaks included) into single spaces and trim
pub fn collapse_whitespace(markup: &str) -> String {
    markup.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Encode raw markup as a `data:image/svg+xml;base64,...` URI
pub fn encode_svg_data_uri(markup: &str) -> String {
    let cleaned = collapse_whitespace(markup);
    format!("{SVG_DATA_URI_PREFIX}{}", STANDARD.encode(cleaned.as_bytes()))
}
