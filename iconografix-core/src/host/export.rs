//! "Add to project" - hand the current selection to the host
//!
//! Only the first selected item is ever transmitted. When more than one is
//! selected, the metadata carries `batchTotal`/`batchIndex` so the host can
//! tell the user only part of the batch arrived.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{error, info};

use super::{encode_svg_data_uri, AddObjectMetadata, HostMessagingChannel, TargetOrigin};
use crate::catalog::ItemRecord;
use crate::error::{CatalogError, Result};
use crate::registry::ProviderRegistry;
use crate::selection::SelectionStore;

/// What an export sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    /// Id of the transmitted item
    pub item_id: String,
    /// How many items were selected
    pub batch_total: usize,
}

/// Reads the selection, resolves content and posts it to the host
#[derive(Debug)]
pub struct AddToProject<'a> {
    registry: &'a ProviderRegistry,
    channel: &'a HostMessagingChannel,
    target_origin: TargetOrigin,
    plugin_name: String,
    plugin_version: String,
}

impl<'a> AddToProject<'a> {
    pub fn new(
        registry: &'a ProviderRegistry,
        channel: &'a HostMessagingChannel,
        target_origin: TargetOrigin,
    ) -> Self {
        Self {
            registry,
            channel,
            target_origin,
            plugin_name: "Iconografix".to_string(),
            plugin_version: "1.0.0".to_string(),
        }
    }

    pub fn with_plugin(mut self, name: &str, version: &str) -> Self {
        self.plugin_name = name.to_string();
        self.plugin_version = version.to_string();
        self
    }

    /// Send the first selected item to the host, then clear the selection
    ///
    /// The selection is cleared whether or not sending succeeded. Returns
    /// `Ok(None)` when nothing is selected.
    pub async fn run(&self, selection: &mut SelectionStore) -> Result<Option<ExportReport>> {
        let selected = selection.snapshot();
        let Some(first) = selected.first() else {
            return Ok(None);
        };
        let batch_total = selected.len();

        let outcome = self.send(first, batch_total).await;
        selection.clear();

        match outcome {
            Ok(()) => {
                if batch_total == 1 {
                    info!("Sent stickerbox: {}", first.display_name);
                } else {
                    info!("Sent first stickerbox from batch of {}", batch_total);
                }
                Ok(Some(ExportReport {
                    item_id: first.id.clone(),
                    batch_total,
                }))
            }
            Err(e) => {
                error!("Failed to add {} to project: {}", first.id, e);
                Err(e)
            }
        }
    }

    async fn send(&self, item: &ItemRecord, batch_total: usize) -> Result<()> {
        let content = self.resolve_content(item).await?;
        let data_string = encode_svg_data_uri(&content);

        let metadata = AddObjectMetadata::for_item(item)
            .with_plugin(&self.plugin_name, &self.plugin_version);
        let metadata = if batch_total > 1 {
            metadata.with_batch(batch_total)
        } else {
            metadata.with_timestamp(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
        };

        self.channel
            .send_add_object(data_string, metadata, &self.target_origin)
    }

    async fn resolve_content(&self, item: &ItemRecord) -> Result<String> {
        let content = match item.cached_content.as_fetched() {
            Some(content) => content.to_string(),
            None => self.registry.get_svg_content(item).await,
        };

        if content.is_empty() {
            return Err(CatalogError::host(format!(
                "No SVG content received for {}",
                item.id
            )));
        }
        Ok(content)
    }
}
