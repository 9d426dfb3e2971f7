//! Typed outbound channel to the embedding host

use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

use super::{AddObjectMetadata, HostMessage, HostTransport};
use crate::error::{CatalogError, Result};

/// Origin the host must have for a message to be delivered
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetOrigin {
    /// `*` - any origin. Refused in production.
    Any,
    /// An exact `scheme://host[:port]` origin
    Exact(String),
}

impl TargetOrigin {
    /// Parse `*` or an exact origin
    ///
    /// One trailing `/` is accepted and dropped.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let value = value.strip_suffix('/').unwrap_or(value);
        if value == "*" {
            return Ok(TargetOrigin::Any);
        }

        let rest = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"))
            .ok_or_else(|| {
                CatalogError::config(format!(
                    "host origin must be '*' or start with http:// or https://: {value}"
                ))
            })?;

        if rest.is_empty() || rest.contains('/') {
            return Err(CatalogError::config(format!(
                "host origin must be scheme://host[:port] without a path: {value}"
            )));
        }

        Ok(TargetOrigin::Exact(value.to_string()))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, TargetOrigin::Any)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TargetOrigin::Any => "*",
            TargetOrigin::Exact(origin) => origin,
        }
    }
}

impl fmt::Display for TargetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sends envelopes to the host through a [`HostTransport`]
#[derive(Clone)]
pub struct HostMessagingChannel {
    transport: Arc<dyn HostTransport>,
    production: bool,
}

impl fmt::Debug for HostMessagingChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostMessagingChannel")
            .field("transport", &self.transport.name())
            .field("production", &self.production)
            .finish()
    }
}

impl HostMessagingChannel {
    pub fn new(transport: Arc<dyn HostTransport>, production: bool) -> Self {
        Self {
            transport,
            production,
        }
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    /// Build an `ADD_OBJECT` envelope and dispatch it to `target_origin`
    ///
    /// `data_string` must already be an encoded data URI (see
    /// [`super::encode_svg_data_uri`]). A wildcard origin is refused in
    /// production.
    pub fn send_add_object(
        &self,
        data_string: String,
        metadata: AddObjectMetadata,
        target_origin: &TargetOrigin,
    ) -> Result<()> {
        if self.production && target_origin.is_wildcard() {
            error!("Refusing to post to a wildcard origin in production");
            return Err(CatalogError::host(
                "wildcard target origin is not allowed in production",
            ));
        }

        let message = HostMessage::add_object(data_string, metadata);
        self.transport
            .post_message(&message, target_origin.as_str())
            .map_err(|e| CatalogError::host(format!("{e:#}")))?;

        debug!(
            "Posted ADD_OBJECT to {} via {}",
            target_origin,
            self.transport.name()
        );
        Ok(())
    }
}
